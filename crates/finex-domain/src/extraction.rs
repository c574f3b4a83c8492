//! Outcome of a field extraction request

use crate::ErrorKind;

/// Result of asking the model to extract the report fields
///
/// Exactly one variant is populated. The success text is opaque: it is
/// whatever the model answered, trimmed, with no further parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// The model returned usable text
    Success {
        /// Trimmed free-form answer
        text: String,
    },

    /// The request failed or produced nothing usable
    Failure {
        /// Failure category
        kind: ErrorKind,
        /// Detail message (underlying cause where one exists)
        message: String,
    },
}

impl ExtractionResult {
    /// Create a success result
    pub fn success(text: impl Into<String>) -> Self {
        ExtractionResult::Success { text: text.into() }
    }

    /// Create a failure result with the kind's default message
    pub fn failure(kind: ErrorKind) -> Self {
        ExtractionResult::Failure {
            kind,
            message: kind.user_message().to_string(),
        }
    }

    /// Create a failure result that carries an underlying cause
    ///
    /// The message is prefixed with the kind's user message, e.g.
    /// `"API Error: connection refused"`.
    pub fn failure_with_cause(kind: ErrorKind, cause: impl std::fmt::Display) -> Self {
        ExtractionResult::Failure {
            kind,
            message: format!("{}: {}", kind.user_message(), cause),
        }
    }

    /// Whether this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    /// The success text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { text } => Some(text),
            ExtractionResult::Failure { .. } => None,
        }
    }

    /// The failure kind, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ExtractionResult::Success { .. } => None,
            ExtractionResult::Failure { kind, .. } => Some(*kind),
        }
    }
}
