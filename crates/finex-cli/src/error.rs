//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Analysis failures are not errors here; they are rendered from the
/// pipeline's display state. These cover setup and I/O only.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key in the environment, flags or config file
    #[error("No API key found. Set GOOGLE_API_KEY or add api_key to the [gemini] section of the config file")]
    MissingCredential,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pipeline setup error
    #[error("Pipeline error: {0}")]
    Extractor(#[from] finex_extractor::ExtractorError),
}
