//! End-to-end pipeline tests against real PDF documents built with lopdf

use finex_extractor::{
    extract_text, FieldExtractor, Pipeline, PipelineConfig, PromptBuilder, TextExtractor,
};
use finex_domain::{DisplayState, ErrorKind, ExtractionFailure};
use finex_llm::{LlmError, MockProvider};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build an in-memory PDF with one text line per entry; an empty slice
/// makes a page without any text.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (720 - 20 * idx as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn pipeline(provider: MockProvider) -> Pipeline<MockProvider> {
    Pipeline::new(FieldExtractor::new(provider), &PipelineConfig::default()).unwrap()
}

#[test]
fn test_extract_text_preserves_page_order() {
    let pdf = build_pdf(&[&["First page revenue"], &["Second page equity"], &["Third page"]]);

    let text = extract_text(&pdf);

    let first = text.find("First page revenue").expect("page 1 text");
    let second = text.find("Second page equity").expect("page 2 text");
    let third = text.find("Third page").expect("page 3 text");
    assert!(first < second && second < third);
}

#[test]
fn test_extract_document_counts_pages() {
    let pdf = build_pdf(&[&["Hello"], &[]]);
    let document = TextExtractor::new().extract_document(&pdf).unwrap();
    assert_eq!(document.page_count, 2);
    assert!(document.failed_pages.is_empty());
}

#[test]
fn test_full_extraction_flow() {
    let pdf = build_pdf(&[
        &["In the fourth quarter, TechCorp Inc. (NASDAQ: TCORP)"],
        &["reported record revenue of 5.2 billion dollars.", "Net income was 1.1 billion dollars."],
    ]);
    let answer = "Company Name: TechCorp Inc.\n\
                  Stock Symbol: TCORP\n\
                  Revenue: 5.2 billion dollars\n\
                  Net Income: 1.1 billion dollars";
    let provider = MockProvider::new(answer);

    let state = pipeline(provider.clone()).analyze(&pdf);

    match &state {
        DisplayState::Succeeded {
            text,
            warning,
            extracted_text,
        } => {
            assert_eq!(text, answer);
            assert!(warning.is_none());
            assert!(extracted_text.contains("TechCorp Inc."));
            assert!(extracted_text.contains("revenue of 5.2 billion"));

            // The prompt carries the extracted text verbatim
            assert_eq!(
                provider.last_prompt(),
                Some(PromptBuilder::new(extracted_text).build())
            );
        }
        other => panic!("Expected success, got {:?}", other),
    }
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_recipe_pdf_flags_low_confidence() {
    let pdf = build_pdf(&[&["Banana bread", "Mash three ripe bananas and stir in melted butter."]]);
    let provider = MockProvider::new(
        "Company Name: Not found\n\
         Stock Symbol: Not found\n\
         Revenue: Not found\n\
         Net Income: Not found",
    );

    let state = pipeline(provider.clone()).analyze(&pdf);

    assert!(state.is_success());
    let warning = state.warning().expect("low confidence warning");
    assert!(warning.matched_keywords.is_empty());
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_textless_pdf_fails_before_model_call() {
    let pdf = build_pdf(&[&[], &[]]);
    let provider = MockProvider::new("unused");

    let state = pipeline(provider.clone()).analyze(&pdf);

    assert_eq!(
        state,
        DisplayState::ExtractionFailed {
            cause: ExtractionFailure::NoText { page_count: 2 }
        }
    );
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_corrupt_pdf_fails_before_model_call() {
    let mut pdf = build_pdf(&[&["revenue and profit"]]);
    pdf.truncate(20);
    let provider = MockProvider::new("unused");

    let state = pipeline(provider.clone()).analyze(&pdf);

    assert_eq!(state.error_kind(), Some(ErrorKind::PdfUnreadable));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_rate_limit_reported_as_api_error() {
    let pdf = build_pdf(&[&["Revenue grew while liabilities fell."]]);
    let provider = MockProvider::failing(LlmError::RateLimitExceeded);

    let state = pipeline(provider).analyze(&pdf);

    match state {
        DisplayState::Failed { kind, message, .. } => {
            assert_eq!(kind, ErrorKind::ApiError);
            assert_eq!(message, "API Error: Rate limit exceeded");
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_uninitialized_client_reported_after_extraction() {
    let pdf = build_pdf(&[&["Revenue and EBITDA both improved."]]);
    let pipeline: Pipeline<MockProvider> = Pipeline::new(
        FieldExtractor::uninitialized("API key is empty"),
        &PipelineConfig::default(),
    )
    .unwrap();

    let state = pipeline.analyze(&pdf);

    assert_eq!(state.error_kind(), Some(ErrorKind::ClientUninitialized));
    assert!(state.extracted_text().unwrap().contains("EBITDA"));
}
