//! Error types for the Extractor

use finex_domain::ExtractionFailure;
use thiserror::Error;

/// Errors that can occur while setting up the pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors from reading text out of a PDF
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextExtractionError {
    /// The buffer could not be opened as a PDF
    #[error("Unreadable PDF: {0}")]
    Unreadable(String),

    /// A single page could not be read
    #[error("Page {page} extraction failed: {reason}")]
    Page {
        /// Page number (1-based)
        page: u32,
        /// Parser diagnostic
        reason: String,
    },

    /// The PDF opened but produced no text
    #[error("No extractable text in {page_count} page(s)")]
    NoText {
        /// Number of pages in the document
        page_count: usize,
    },
}

impl TextExtractionError {
    /// Domain-level cause for a failed extraction
    pub fn to_failure(&self) -> ExtractionFailure {
        match self {
            TextExtractionError::NoText { page_count } => ExtractionFailure::NoText {
                page_count: *page_count,
            },
            TextExtractionError::Unreadable(reason) => ExtractionFailure::Unreadable {
                reason: reason.clone(),
            },
            TextExtractionError::Page { .. } => ExtractionFailure::Unreadable {
                reason: self.to_string(),
            },
        }
    }
}

/// A bare reader diagnostic is treated as an open failure
impl From<String> for TextExtractionError {
    fn from(reason: String) -> Self {
        TextExtractionError::Unreadable(reason)
    }
}
