//! Finex LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `finex-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use finex_llm::MockProvider;
//! use finex_domain::traits::LlmProvider;
//! use finex_domain::GenerationConfig;
//!
//! let provider = MockProvider::new("Company Name: Not found");
//! let response = provider.generate("test prompt", &GenerationConfig::default()).unwrap();
//! assert_eq!(response.text.as_deref(), Some("Company Name: Not found"));
//! ```

#![warn(missing_docs)]

pub mod gemini;

use finex_domain::traits::{FailureKind, LlmProvider as LlmProviderTrait};
use finex_domain::{ErrorKind, GenerationConfig, GenerationResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credential missing or malformed
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl FailureKind for LlmError {
    fn failure_kind(&self) -> ErrorKind {
        match self {
            LlmError::InvalidResponse(_) => ErrorKind::ResponseProcessingError,
            LlmError::InvalidCredential(_) => ErrorKind::ClientUninitialized,
            LlmError::Communication(_)
            | LlmError::RateLimitExceeded
            | LlmError::ModelNotAvailable(_)
            | LlmError::Other(_) => ErrorKind::ApiError,
        }
    }
}

/// A canned reply
#[derive(Debug, Clone)]
enum MockReply {
    Response(GenerationResponse),
    Error(LlmError),
}

#[derive(Debug, Default)]
struct MockLog {
    call_count: usize,
    prompts: Vec<String>,
    configs: Vec<GenerationConfig>,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls, and records every prompt and config it receives.
///
/// # Examples
///
/// ```
/// use finex_llm::{LlmError, MockProvider};
/// use finex_domain::traits::LlmProvider;
/// use finex_domain::GenerationConfig;
///
/// let config = GenerationConfig::default();
///
/// // Fixed response plus per-prompt overrides
/// let mut provider = MockProvider::new("Fixed response");
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", LlmError::RateLimitExceeded);
///
/// assert_eq!(provider.generate("any", &config).unwrap().text.as_deref(), Some("Fixed response"));
/// assert_eq!(provider.generate("prompt1", &config).unwrap().text.as_deref(), Some("response1"));
/// assert!(provider.generate("prompt2", &config).is_err());
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    log: Arc<Mutex<MockLog>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed text response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_response(GenerationResponse::from_text(response))
    }

    /// Create a MockProvider that returns a raw response for all prompts
    pub fn with_response(response: GenerationResponse) -> Self {
        Self::from_reply(MockReply::Response(response))
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self::from_reply(MockReply::Error(error))
    }

    fn from_reply(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            log: Arc::new(Mutex::new(MockLog::default())),
            model_name: "mock".to_string(),
        }
    }

    /// Add a specific text response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).insert(
            prompt.into(),
            MockReply::Response(GenerationResponse::from_text(response)),
        );
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        lock(&self.replies).insert(prompt.into(), MockReply::Error(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.log).call_count
    }

    /// Reset the call count and recorded requests
    pub fn reset_call_count(&self) {
        *lock(&self.log) = MockLog::default();
    }

    /// Every prompt received, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.log).prompts.clone()
    }

    /// The most recent prompt
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.log).prompts.last().cloned()
    }

    /// The most recent generation config
    pub fn last_config(&self) -> Option<GenerationConfig> {
        lock(&self.log).configs.last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResponse, Self::Error> {
        {
            let mut log = lock(&self.log);
            log.call_count += 1;
            log.prompts.push(prompt.to_string());
            log.configs.push(config.clone());
        }

        let reply = lock(&self.replies)
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Error(error) => Err(error),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

// A poisoned lock only means another test thread panicked mid-call; the
// recorded data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
