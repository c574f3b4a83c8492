//! Normalize model output into an extraction result

use finex_domain::{ErrorKind, ExtractionResult, GenerationResponse};
use tracing::debug;

/// Normalize a generation response
///
/// Uses the primary text output; when that is missing or blank, falls back to
/// the first candidate's first content part. Returns `EmptyResponse` if neither
/// holds any non-whitespace text, otherwise the trimmed text.
pub fn normalize_response(response: &GenerationResponse) -> ExtractionResult {
    let primary = response
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty());

    let text = match primary {
        Some(text) => Some(text),
        None => {
            debug!("No primary text in response, falling back to first candidate part");
            response.first_part_text()
        }
    };

    match text.map(str::trim) {
        Some(text) if !text.is_empty() => {
            debug!("Raw API response: {}", text);
            ExtractionResult::success(text)
        }
        _ => ExtractionResult::failure(ErrorKind::EmptyResponse),
    }
}
