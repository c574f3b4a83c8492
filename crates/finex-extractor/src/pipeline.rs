//! Pipeline orchestrator: PDF bytes to display state

use crate::config::PipelineConfig;
use crate::error::{ExtractorError, TextExtractionError};
use crate::extractor::FieldExtractor;
use crate::pdf::{LopdfReader, TextExtractor};
use finex_domain::traits::{DocumentReader, LlmProvider};
use finex_domain::{DisplayState, LowConfidenceWarning, RelevanceHeuristic, RunId};
use std::fmt::Display;
use tracing::{info, info_span, warn};

/// Runs text extraction, the relevance check and field extraction in order
///
/// Each call to [`Pipeline::analyze`] is independent; nothing is carried over
/// between runs.
pub struct Pipeline<L, R = LopdfReader> {
    text_extractor: TextExtractor<R>,
    heuristic: RelevanceHeuristic,
    field_extractor: FieldExtractor<L>,
}

impl<L> Pipeline<L, LopdfReader>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a pipeline that reads PDFs with `lopdf`
    pub fn new(
        field_extractor: FieldExtractor<L>,
        config: &PipelineConfig,
    ) -> Result<Self, ExtractorError> {
        Self::with_reader(LopdfReader, field_extractor, config)
    }
}

impl<L, R> Pipeline<L, R>
where
    L: LlmProvider,
    L::Error: Display,
    R: DocumentReader,
    R::Error: Into<TextExtractionError> + Display,
{
    /// Create a pipeline with a custom document reader
    pub fn with_reader(
        reader: R,
        field_extractor: FieldExtractor<L>,
        config: &PipelineConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            text_extractor: TextExtractor::with_reader(reader),
            heuristic: config.heuristic(),
            field_extractor,
        })
    }

    /// The field extraction client
    pub fn field_extractor(&self) -> &FieldExtractor<L> {
        &self.field_extractor
    }

    /// The relevance heuristic in use
    pub fn heuristic(&self) -> &RelevanceHeuristic {
        &self.heuristic
    }

    /// Analyze one PDF buffer
    pub fn analyze(&self, bytes: &[u8]) -> DisplayState {
        let run_id = RunId::new();
        let span = info_span!("analysis", run_id = %run_id);
        let _enter = span.enter();

        info!("Starting analysis of {} byte document", bytes.len());

        let document = match self.text_extractor.extract_document(bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not extract text: {}", e);
                return DisplayState::ExtractionFailed {
                    cause: e.to_failure(),
                };
            }
        };

        info!(
            "Extracted {} chars from {} page(s)",
            document.text.len(),
            document.page_count
        );

        self.run_text(document.text)
    }

    /// Analyze text that has already been extracted
    ///
    /// Runs the relevance check and field extraction only.
    pub fn analyze_text(&self, text: impl Into<String>) -> DisplayState {
        let run_id = RunId::new();
        let span = info_span!("analysis", run_id = %run_id);
        let _enter = span.enter();

        self.run_text(text.into())
    }

    fn run_text(&self, text: String) -> DisplayState {
        let assessment = self.heuristic.assess(&text);
        let warning = if assessment.is_financial() {
            None
        } else {
            warn!(
                "Document matched {} of {} required financial keywords",
                assessment.matched.len(),
                assessment.min_matches
            );
            Some(LowConfidenceWarning {
                matched_keywords: assessment.matched,
                min_matches: assessment.min_matches,
            })
        };

        let result = self.field_extractor.extract(&text);
        let state = DisplayState::from_result(result, warning, text);

        info!("Analysis finished: {}", state.status());
        state
    }
}
