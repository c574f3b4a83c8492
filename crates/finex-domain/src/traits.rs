//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ErrorKind, GenerationConfig, GenerationResponse};

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (finex-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error: FailureKind;

    /// Send one prompt with the given settings
    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResponse, Self::Error>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Maps an infrastructure error onto the domain taxonomy
pub trait FailureKind {
    /// The kind this error is reported as
    fn failure_kind(&self) -> ErrorKind;
}

/// Trait for reading page texts out of a document buffer
///
/// Implemented by the application layer (finex-extractor)
pub trait DocumentReader {
    /// Error type for open and per-page failures
    type Error;

    /// Open `bytes` and extract every page's text
    ///
    /// The outer `Err` means the document could not be opened at all. Otherwise
    /// there is one entry per page, in page order, and a failed page does not
    /// affect the others.
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<Result<String, Self::Error>>, Self::Error>;
}
