//! Field extraction client

use crate::parser::normalize_response;
use crate::prompt::PromptBuilder;
use finex_domain::traits::{FailureKind, LlmProvider};
use finex_domain::{ErrorKind, ExtractionResult, GenerationConfig};
use std::fmt::Display;
use tracing::{info, warn};

/// Sample report snippet used to check the connection to the model
pub const SAMPLE_TEXT: &str = "
    In the fourth quarter, TechCorp Inc. (NASDAQ: TCORP) reported record revenue of 5.2 billion dollars.
    The company's net income for the period was 1.1 billion dollars.
    ";

/// Asks the model for the four report fields
///
/// The provider is injected. A client built from a failed provider
/// initialization stays usable but answers every request with
/// `ClientUninitialized` without touching the network.
pub struct FieldExtractor<L> {
    provider: Result<L, String>,
}

impl<L> FieldExtractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a client around an initialized provider
    pub fn new(provider: L) -> Self {
        Self {
            provider: Ok(provider),
        }
    }

    /// Create a client whose provider could not be initialized
    pub fn uninitialized(reason: impl Into<String>) -> Self {
        Self {
            provider: Err(reason.into()),
        }
    }

    /// Create a client from the outcome of provider initialization
    pub fn from_init<E: Display>(init: Result<L, E>) -> Self {
        match init {
            Ok(provider) => Self::new(provider),
            Err(e) => {
                warn!("Failed to initialize model client: {}", e);
                Self::uninitialized(e.to_string())
            }
        }
    }

    /// Whether a provider is available
    pub fn is_initialized(&self) -> bool {
        self.provider.is_ok()
    }

    /// The provider, if initialized
    pub fn provider(&self) -> Option<&L> {
        self.provider.as_ref().ok()
    }

    /// Extract the report fields from `text`
    ///
    /// Never fails: every problem is reported as a `Failure` result.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        if text.trim().is_empty() {
            return ExtractionResult::failure(ErrorKind::EmptyInput);
        }

        let provider = match &self.provider {
            Ok(provider) => provider,
            Err(reason) => {
                warn!("Extraction requested but model client is not initialized");
                return ExtractionResult::failure_with_cause(ErrorKind::ClientUninitialized, reason);
            }
        };

        let prompt = PromptBuilder::new(text).build();
        let config = GenerationConfig::plain_text_unfiltered();

        info!(
            "Requesting field extraction from '{}' ({} chars of text)",
            provider.model_name(),
            text.len()
        );

        match provider.generate(&prompt, &config) {
            Ok(response) => normalize_response(&response),
            Err(e) => {
                let kind = e.failure_kind();
                warn!("Field extraction failed ({}): {}", kind, e);
                ExtractionResult::failure_with_cause(kind, e)
            }
        }
    }

    /// Send the built-in sample snippet to check that the model answers
    pub fn check_connection(&self) -> ExtractionResult {
        info!("Checking model connection with sample text");
        self.extract(SAMPLE_TEXT)
    }
}
