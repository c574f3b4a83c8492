//! Display states - the terminal outcome of one pipeline run

use crate::{ErrorKind, ExtractionResult};
use std::fmt;

/// Why no text came out of the PDF
///
/// The user-facing kind is always [`ErrorKind::PdfUnreadable`]; the cause is
/// kept so that a blank or image-only PDF can be told apart from a corrupt one
/// in logs and detailed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// The buffer could not be opened as a PDF
    Unreadable {
        /// Parser diagnostic
        reason: String,
    },

    /// The PDF opened but yielded no text
    NoText {
        /// Number of pages in the document
        page_count: usize,
    },
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::Unreadable { reason } => write!(f, "unreadable PDF: {}", reason),
            ExtractionFailure::NoText { page_count } => {
                write!(f, "no extractable text in {} page(s)", page_count)
            }
        }
    }
}

/// Non-fatal annotation: the text does not look like a financial report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowConfidenceWarning {
    /// Keywords that did match
    pub matched_keywords: Vec<String>,
    /// Distinct matches that were required
    pub min_matches: usize,
}

impl LowConfidenceWarning {
    /// Message shown to the end user
    pub fn user_message(&self) -> &'static str {
        "This document does not seem to be a financial report. Analysis will proceed, but results may be inaccurate."
    }
}

/// Terminal outcome of one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No text could be extracted; the model was never called
    ExtractionFailed {
        /// Underlying cause
        cause: ExtractionFailure,
    },

    /// The model returned the extracted fields
    Succeeded {
        /// Opaque field text
        text: String,
        /// Set when the relevance heuristic did not match
        warning: Option<LowConfidenceWarning>,
        /// Full text extracted from the document
        extracted_text: String,
    },

    /// Text was extracted but field extraction failed
    Failed {
        /// Failure category
        kind: ErrorKind,
        /// Detail message
        message: String,
        /// Set when the relevance heuristic did not match
        warning: Option<LowConfidenceWarning>,
        /// Full text extracted from the document
        extracted_text: String,
    },
}

impl DisplayState {
    /// Build the terminal state from a field extraction result
    pub fn from_result(
        result: ExtractionResult,
        warning: Option<LowConfidenceWarning>,
        extracted_text: String,
    ) -> Self {
        match result {
            ExtractionResult::Success { text } => DisplayState::Succeeded {
                text,
                warning,
                extracted_text,
            },
            ExtractionResult::Failure { kind, message } => DisplayState::Failed {
                kind,
                message,
                warning,
                extracted_text,
            },
        }
    }

    /// Whether the run ended in success
    pub fn is_success(&self) -> bool {
        matches!(self, DisplayState::Succeeded { .. })
    }

    /// The error kind, if the run failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            DisplayState::ExtractionFailed { .. } => Some(ErrorKind::PdfUnreadable),
            DisplayState::Succeeded { .. } => None,
            DisplayState::Failed { kind, .. } => Some(*kind),
        }
    }

    /// The low-confidence warning, if one was raised
    pub fn warning(&self) -> Option<&LowConfidenceWarning> {
        match self {
            DisplayState::ExtractionFailed { .. } => None,
            DisplayState::Succeeded { warning, .. } | DisplayState::Failed { warning, .. } => {
                warning.as_ref()
            }
        }
    }

    /// The extracted document text, if extraction succeeded
    pub fn extracted_text(&self) -> Option<&str> {
        match self {
            DisplayState::ExtractionFailed { .. } => None,
            DisplayState::Succeeded { extracted_text, .. }
            | DisplayState::Failed { extracted_text, .. } => Some(extracted_text),
        }
    }

    /// Short status label, e.g. `"succeeded"`
    pub fn status(&self) -> &'static str {
        match self {
            DisplayState::ExtractionFailed { .. } => "extraction-failed",
            DisplayState::Succeeded { .. } => "succeeded",
            DisplayState::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning() -> LowConfidenceWarning {
        LowConfidenceWarning {
            matched_keywords: vec!["loss".to_string()],
            min_matches: 2,
        }
    }

    #[test]
    fn test_from_success() {
        let state = DisplayState::from_result(
            ExtractionResult::success("Revenue: 5.2 billion"),
            None,
            "doc".to_string(),
        );
        assert!(state.is_success());
        assert_eq!(state.status(), "succeeded");
        assert_eq!(state.error_kind(), None);
        assert_eq!(state.extracted_text(), Some("doc"));
    }

    #[test]
    fn test_from_failure_keeps_warning() {
        let state = DisplayState::from_result(
            ExtractionResult::failure(ErrorKind::EmptyResponse),
            Some(warning()),
            "doc".to_string(),
        );
        assert!(!state.is_success());
        assert_eq!(state.status(), "failed");
        assert_eq!(state.error_kind(), Some(ErrorKind::EmptyResponse));
        assert_eq!(state.warning(), Some(&warning()));
    }

    #[test]
    fn test_extraction_failed() {
        let state = DisplayState::ExtractionFailed {
            cause: ExtractionFailure::NoText { page_count: 3 },
        };
        assert_eq!(state.error_kind(), Some(ErrorKind::PdfUnreadable));
        assert_eq!(state.warning(), None);
        assert_eq!(state.extracted_text(), None);
        assert_eq!(state.status(), "extraction-failed");
    }

    #[test]
    fn test_failure_cause_display() {
        let cause = ExtractionFailure::Unreadable {
            reason: "invalid file header".to_string(),
        };
        assert_eq!(cause.to_string(), "unreadable PDF: invalid file header");
        assert_eq!(
            ExtractionFailure::NoText { page_count: 2 }.to_string(),
            "no extractable text in 2 page(s)"
        );
    }
}
