//! Gemini Provider Implementation
//!
//! Integration with Google's Gemini `generateContent` REST API.
//!
//! # Features
//!
//! - Async HTTP communication with the Gemini API
//! - Configurable endpoint and model
//! - Credential passed in explicitly, never read from ambient state
//! - Single best-effort round trip: no retries, no client-side timeout
//!
//! # Examples
//!
//! ```no_run
//! use finex_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::new("my-api-key", "gemini-1.5-flash").unwrap();
//!
//! // The generate_content method is async; the LlmProvider trait provides a
//! // blocking wrapper for synchronous callers.
//! ```

use crate::LlmError;
use finex_domain::traits::LlmProvider as LlmProviderTrait;
use finex_domain::{Candidate, Content, GenerationConfig, GenerationResponse, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: RequestGenerationConfig<'a>,
    safety_settings: Vec<RequestSafetySetting>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Serialize)]
struct RequestSafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Response from the generateContent API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseCandidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Google API key
    /// - `model`: Model to use (e.g., "gemini-1.5-flash")
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidCredential` if the key is empty or contains
    /// whitespace, and `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;

        // No idle pooling: each blocking call drives its own runtime
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Create a new Gemini provider with the default model
    pub fn default_model(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the generateContent call
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Generate content using the Gemini API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The network request fails
    /// - The API answers with a non-success status
    /// - The response body is not a valid generateContent response
    pub async fn generate_content(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResponse, LlmError> {
        let body = request_body(prompt, config);

        debug!(
            "Sending generateContent request to model '{}' ({} prompt chars)",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            parse_response(&text)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(LlmError::ModelNotAvailable(self.model.clone()))
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(LlmError::RateLimitExceeded)
        } else {
            Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status,
                error_message(&text)
            )))
        }
    }
}

impl GeminiProvider {
    /// Drive one request on a private current-thread runtime
    fn generate_blocking(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResponse, LlmError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to create runtime: {}", e)))?;

        runtime.block_on(self.generate_content(prompt, config))
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResponse, Self::Error> {
        // A runtime cannot be blocked on from inside another one, so async
        // callers get the request driven from a separate thread
        if tokio::runtime::Handle::try_current().is_ok() {
            return std::thread::scope(|scope| {
                scope
                    .spawn(|| self.generate_blocking(prompt, config))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(LlmError::Other("Request thread panicked".to_string()))
                    })
            });
        }

        self.generate_blocking(prompt, config)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn validate_api_key(api_key: &str) -> Result<(), LlmError> {
    if api_key.trim().is_empty() {
        return Err(LlmError::InvalidCredential("API key is empty".to_string()));
    }
    if api_key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LlmError::InvalidCredential(
            "API key contains whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}

fn request_body<'a>(prompt: &'a str, config: &'a GenerationConfig) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: RequestGenerationConfig {
            response_mime_type: &config.response_mime_type,
        },
        safety_settings: config
            .safety_settings
            .iter()
            .map(|s| RequestSafetySetting {
                category: s.category.as_str(),
                threshold: s.threshold.as_str(),
            })
            .collect(),
    }
}

/// Decode a success body into the provider-neutral response
///
/// The primary text is the concatenation of the first candidate's text parts,
/// or `None` when it has none.
fn parse_response(body: &str) -> Result<GenerationResponse, LlmError> {
    let raw: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if raw.candidates.is_empty() {
        if let Some(reason) = raw.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("Prompt was blocked by the service: {}", reason);
        }
    }

    let candidates: Vec<Candidate> = raw
        .candidates
        .into_iter()
        .map(|c| Candidate {
            content: c.content.map(|content| Content {
                parts: content
                    .parts
                    .into_iter()
                    .map(|p| Part { text: p.text })
                    .collect(),
            }),
            finish_reason: c.finish_reason,
        })
        .collect();

    let text = candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| {
            let texts: Vec<&str> = content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.concat())
            }
        });

    Ok(GenerationResponse { text, candidates })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
