//! PDF text extraction
//!
//! Concatenates page texts in page order. A page that fails to extract
//! contributes nothing; a document that cannot be opened yields an empty
//! string. `lopdf` can panic on some malformed input, so every call into it is
//! wrapped in [`std::panic::catch_unwind`].

use crate::error::TextExtractionError;
use finex_domain::traits::DocumentReader;
use lopdf::Document;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// `DocumentReader` backed by `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfReader;

impl DocumentReader for LopdfReader {
    type Error = TextExtractionError;

    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<Result<String, Self::Error>>, Self::Error> {
        let document = guarded(|| Document::load_mem(bytes))
            .ok_or_else(|| {
                TextExtractionError::Unreadable("parser panicked (malformed document)".to_string())
            })?
            .map_err(|e| TextExtractionError::Unreadable(e.to_string()))?;

        // get_pages is keyed by page number, so iteration is in page order
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!("PDF opened with {} page(s)", page_numbers.len());

        let pages = page_numbers
            .into_iter()
            .map(|page| {
                match guarded(|| document.extract_text(&[page])) {
                    Some(Ok(text)) => Ok(text),
                    Some(Err(e)) => Err(TextExtractionError::Page {
                        page,
                        reason: e.to_string(),
                    }),
                    None => Err(TextExtractionError::Page {
                        page,
                        reason: "parser panicked".to_string(),
                    }),
                }
            })
            .collect();

        Ok(pages)
    }
}

fn guarded<T>(f: impl FnOnce() -> T) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}

/// Text pulled out of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Page texts concatenated in page order, no separator
    pub text: String,
    /// Number of pages in the document
    pub page_count: usize,
    /// 1-based positions of pages whose extraction failed
    pub failed_pages: Vec<usize>,
}

/// Converts PDF buffers into text
#[derive(Debug, Clone, Default)]
pub struct TextExtractor<R = LopdfReader> {
    reader: R,
}

impl TextExtractor<LopdfReader> {
    /// Extractor using `lopdf`
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R> TextExtractor<R>
where
    R: DocumentReader,
    R::Error: Into<TextExtractionError> + Display,
{
    /// Extractor using a custom reader
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Extract text, keeping diagnostics
    ///
    /// # Errors
    ///
    /// - `Unreadable` if the buffer cannot be opened as a PDF
    /// - `NoText` if the document opened but every page produced empty text
    pub fn extract_document(&self, bytes: &[u8]) -> Result<ExtractedDocument, TextExtractionError> {
        let pages = self
            .reader
            .read_pages(bytes)
            .map_err(Into::<TextExtractionError>::into)?;

        let page_count = pages.len();
        let mut text = String::new();
        let mut failed_pages = Vec::new();

        for (idx, page) in pages.into_iter().enumerate() {
            match page {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    warn!("Skipping page {}: {}", idx + 1, e);
                    failed_pages.push(idx + 1);
                }
            }
        }

        if text.is_empty() {
            return Err(TextExtractionError::NoText { page_count });
        }

        debug!(
            "Extracted {} chars from {} page(s), {} failed",
            text.len(),
            page_count,
            failed_pages.len()
        );

        Ok(ExtractedDocument {
            text,
            page_count,
            failed_pages,
        })
    }

    /// Extract text, collapsing every failure into an empty string
    ///
    /// The cause is logged, never returned.
    pub fn extract_text(&self, bytes: &[u8]) -> String {
        match self.extract_document(bytes) {
            Ok(document) => document.text,
            Err(e) => {
                warn!("Text extraction failed: {}", e);
                String::new()
            }
        }
    }
}

/// Extract text from a PDF buffer with `lopdf`; empty string on any failure
pub fn extract_text(bytes: &[u8]) -> String {
    TextExtractor::new().extract_text(bytes)
}
