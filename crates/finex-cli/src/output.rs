//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use finex_domain::{DisplayState, ExtractionResult, LowConfidenceWarning};
use serde_json::{json, Value};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the outcome of one analysis.
    ///
    /// The extracted text is only included when `show_text` is set.
    pub fn format_state(&self, state: &DisplayState, show_text: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&state_json(state, show_text))?),
            OutputFormat::Text => Ok(self.state_text(state, show_text)),
            OutputFormat::Quiet => Ok(state_quiet(state)),
        }
    }

    /// Format a bare field extraction result, as produced by the API check.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = match result {
                    ExtractionResult::Success { text } => json!({
                        "status": "succeeded",
                        "fields": text,
                    }),
                    ExtractionResult::Failure { kind, message } => json!({
                        "status": "failed",
                        "error_kind": kind.as_str(),
                        "message": message,
                    }),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Text => Ok(match result {
                ExtractionResult::Success { text } => {
                    format!("{}\n{}", self.success("API connection OK"), text)
                }
                ExtractionResult::Failure { message, .. } => self.error(message),
            }),
            OutputFormat::Quiet => Ok(match result {
                ExtractionResult::Success { text } => text.clone(),
                ExtractionResult::Failure { kind, .. } => kind.to_string(),
            }),
        }
    }

    fn state_text(&self, state: &DisplayState, show_text: bool) -> String {
        let mut lines = Vec::new();

        if let Some(warning) = state.warning() {
            lines.push(self.warning(warning.user_message()));
        }

        match state {
            DisplayState::ExtractionFailed { cause } => {
                lines.push(self.error(
                    state
                        .error_kind()
                        .map(|kind| kind.user_message())
                        .unwrap_or_default(),
                ));
                lines.push(self.paint(&format!("  Cause: {}", cause), Color::BrightBlack));
            }
            DisplayState::Succeeded { text, .. } => {
                lines.push(self.heading("Extracted Information"));
                lines.push(text.clone());
            }
            DisplayState::Failed { message, .. } => {
                lines.push(self.error(message));
            }
        }

        if let Some(extracted) = state.extracted_text() {
            if show_text {
                lines.push(String::new());
                lines.push(self.heading("Extracted Text"));
                lines.push(extracted.to_string());
            } else {
                lines.push(self.info(&format!(
                    "Extracted text hidden ({} chars); use --show-text to display it",
                    extracted.chars().count()
                )));
            }
        }

        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.paint(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.paint(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.paint(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.paint(&format!("⚠ {}", message), Color::Yellow)
    }

    fn heading(&self, title: &str) -> String {
        if self.color_enabled {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn paint(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn warning_json(warning: Option<&LowConfidenceWarning>) -> Value {
    match warning {
        Some(warning) => json!({
            "message": warning.user_message(),
            "matched_keywords": warning.matched_keywords,
            "min_matches": warning.min_matches,
        }),
        None => Value::Null,
    }
}

fn state_json(state: &DisplayState, show_text: bool) -> Value {
    let mut value = match state {
        DisplayState::ExtractionFailed { cause } => json!({
            "status": state.status(),
            "error_kind": state.error_kind().map(|kind| kind.as_str()),
            "message": state.error_kind().map(|kind| kind.user_message()),
            "cause": cause.to_string(),
        }),
        DisplayState::Succeeded { text, warning, .. } => json!({
            "status": state.status(),
            "fields": text,
            "warning": warning_json(warning.as_ref()),
        }),
        DisplayState::Failed {
            kind,
            message,
            warning,
            ..
        } => json!({
            "status": state.status(),
            "error_kind": kind.as_str(),
            "message": message,
            "warning": warning_json(warning.as_ref()),
        }),
    };

    if let (true, Some(extracted), Value::Object(map)) =
        (show_text, state.extracted_text(), &mut value)
    {
        map.insert("extracted_text".to_string(), json!(extracted));
    }

    value
}

fn state_quiet(state: &DisplayState) -> String {
    match state {
        DisplayState::Succeeded { text, .. } => text.clone(),
        _ => state
            .error_kind()
            .map(|kind| kind.to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finex_domain::{ErrorKind, ExtractionFailure};

    fn succeeded(warning: Option<LowConfidenceWarning>) -> DisplayState {
        DisplayState::Succeeded {
            text: "Company Name: TechCorp Inc.\nStock Symbol: TCORP".to_string(),
            warning,
            extracted_text: "TechCorp Inc. revenue of 5.2 billion".to_string(),
        }
    }

    fn low_confidence() -> LowConfidenceWarning {
        LowConfidenceWarning {
            matched_keywords: vec!["loss".to_string()],
            min_matches: 2,
        }
    }

    #[test]
    fn test_text_success_hides_extracted_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_state(&succeeded(None), false).unwrap();

        assert!(output.contains("Extracted Information"));
        assert!(output.contains("Stock Symbol: TCORP"));
        assert!(!output.contains("revenue of 5.2 billion"));
        assert!(output.contains("--show-text"));
        assert!(!output.contains('⚠'));
    }

    #[test]
    fn test_text_show_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_state(&succeeded(None), true).unwrap();
        assert!(output.contains("Extracted Text\nTechCorp Inc. revenue of 5.2 billion"));
    }

    #[test]
    fn test_text_warning_comes_first() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter
            .format_state(&succeeded(Some(low_confidence())), false)
            .unwrap();
        assert!(output.starts_with("⚠ This document does not seem to be a financial report."));
    }

    #[test]
    fn test_text_extraction_failed() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let state = DisplayState::ExtractionFailed {
            cause: ExtractionFailure::NoText { page_count: 3 },
        };
        let output = formatter.format_state(&state, true).unwrap();

        assert!(output.starts_with("✗ Could not extract text from the PDF."));
        assert!(output.contains("no extractable text in 3 page(s)"));
        assert!(!output.contains("Extracted Text"));
    }

    #[test]
    fn test_json_failed_state() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let state = DisplayState::Failed {
            kind: ErrorKind::ApiError,
            message: "API Error: Rate limit exceeded".to_string(),
            warning: Some(low_confidence()),
            extracted_text: "text".to_string(),
        };
        let output = formatter.format_state(&state, false).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["status"], "failed");
        assert_eq!(value["error_kind"], "api-error");
        assert_eq!(value["message"], "API Error: Rate limit exceeded");
        assert_eq!(value["warning"]["matched_keywords"], json!(["loss"]));
        assert!(value.get("extracted_text").is_none());
    }

    #[test]
    fn test_json_success_with_text() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_state(&succeeded(None), true).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["status"], "succeeded");
        assert_eq!(value["warning"], Value::Null);
        assert_eq!(value["extracted_text"], "TechCorp Inc. revenue of 5.2 billion");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(
            formatter.format_state(&succeeded(None), true).unwrap(),
            "Company Name: TechCorp Inc.\nStock Symbol: TCORP"
        );

        let failed = DisplayState::ExtractionFailed {
            cause: ExtractionFailure::Unreadable {
                reason: "bad header".to_string(),
            },
        };
        assert_eq!(formatter.format_state(&failed, false).unwrap(), "pdf-unreadable");
    }

    #[test]
    fn test_format_result() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let ok = formatter
            .format_result(&ExtractionResult::success("Company Name: TechCorp Inc."))
            .unwrap();
        assert_eq!(ok, "✓ API connection OK\nCompany Name: TechCorp Inc.");

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        let failed = quiet
            .format_result(&ExtractionResult::failure(ErrorKind::EmptyResponse))
            .unwrap();
        assert_eq!(failed, "empty-response");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
