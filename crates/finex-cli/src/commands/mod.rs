//! Command implementations.

pub mod analyze;
pub mod check_api;
pub mod config;

pub use self::analyze::execute_analyze;
pub use self::check_api::execute_check_api;
pub use self::config::execute_config;

use crate::config::Config;
use crate::error::Result;
use finex_extractor::FieldExtractor;
use finex_llm::GeminiProvider;

/// Build the field extraction client for this process.
///
/// A missing API key is fatal. A key that is present but rejected by the
/// provider yields an uninitialized client, which reports
/// `client-uninitialized` on every request instead.
pub fn build_field_extractor(
    config: &Config,
    api_key: Option<&str>,
    model: Option<&str>,
) -> Result<FieldExtractor<GeminiProvider>> {
    let api_key = config.resolve_api_key(api_key)?;
    let model = model.unwrap_or(&config.gemini.model);

    let provider = GeminiProvider::new(api_key, model)
        .map(|provider| provider.with_endpoint(config.gemini.endpoint.clone()));

    Ok(FieldExtractor::from_init(provider))
}
