//! Error taxonomy for a single analysis run

use std::fmt;

/// Labelled failure category
///
/// Every failure in the pipeline is caught where it happens and converted into
/// one of these kinds. Each kind has a stable machine label and a distinct
/// human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No text could be extracted from the PDF (corrupt, image-only or blank)
    PdfUnreadable,

    /// The model client could not be created (missing or malformed credential)
    ClientUninitialized,

    /// The text to analyze was empty after trimming
    EmptyInput,

    /// Network or service failure while calling the model
    ApiError,

    /// The model answered but no usable text was found
    EmptyResponse,

    /// The model's response had an unexpected shape
    ResponseProcessingError,
}

impl ErrorKind {
    /// All kinds, in taxonomy order
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::PdfUnreadable,
        ErrorKind::ClientUninitialized,
        ErrorKind::EmptyInput,
        ErrorKind::ApiError,
        ErrorKind::EmptyResponse,
        ErrorKind::ResponseProcessingError,
    ];

    /// Stable label, e.g. `"api-error"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PdfUnreadable => "pdf-unreadable",
            ErrorKind::ClientUninitialized => "client-uninitialized",
            ErrorKind::EmptyInput => "empty-input",
            ErrorKind::ApiError => "api-error",
            ErrorKind::EmptyResponse => "empty-response",
            ErrorKind::ResponseProcessingError => "response-processing-error",
        }
    }

    /// Parse a kind from its label
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Message shown to the end user for this kind
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::PdfUnreadable => {
                "Could not extract text from the PDF. The file might be empty, corrupted, or contain only images."
            }
            ErrorKind::ClientUninitialized => "API client not initialized",
            ErrorKind::EmptyInput => "Empty input text",
            ErrorKind::ApiError => "API Error",
            ErrorKind::EmptyResponse => "Empty API response",
            ErrorKind::ResponseProcessingError => "Response processing error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
