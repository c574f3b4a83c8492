//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use finex_domain::traits::LlmProvider;
use finex_domain::DisplayState;
use finex_extractor::Pipeline;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Execute the analyze command.
///
/// Returns whether the analysis succeeded.
pub fn execute_analyze<L>(
    args: &AnalyzeArgs,
    pipeline: &Pipeline<L>,
    formatter: &Formatter,
) -> Result<bool>
where
    L: LlmProvider,
    L::Error: Display,
{
    let state = analyze_file(&args.file, pipeline)?;
    println!("{}", formatter.format_state(&state, args.show_text)?);
    Ok(state.is_success())
}

/// Read `path` and run it through the pipeline.
pub fn analyze_file<L>(path: &Path, pipeline: &Pipeline<L>) -> Result<DisplayState>
where
    L: LlmProvider,
    L::Error: Display,
{
    let bytes = read_document(path)?;
    info!("Analyzing {}", path.display());
    Ok(pipeline.analyze(&bytes))
}

fn read_document(path: &Path) -> Result<Vec<u8>> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        warn!("{} does not have a .pdf extension", path.display());
    }

    fs::read(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finex_domain::ErrorKind;
    use finex_extractor::{FieldExtractor, PipelineConfig};
    use finex_llm::MockProvider;
    use tempfile::TempDir;

    fn pipeline(provider: MockProvider) -> Pipeline<MockProvider> {
        Pipeline::new(FieldExtractor::new(provider), &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = TempDir::new().unwrap();
        let result = analyze_file(
            &dir.path().join("absent.pdf"),
            &pipeline(MockProvider::default()),
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_non_pdf_bytes_fail_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "revenue and profit, but not a PDF").unwrap();

        let provider = MockProvider::new("unused");
        let state = analyze_file(&path, &pipeline(provider.clone())).unwrap();

        assert_eq!(state.error_kind(), Some(ErrorKind::PdfUnreadable));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_execute_reports_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4 garbage").unwrap();

        let args = AnalyzeArgs {
            file: path,
            show_text: false,
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        let succeeded =
            execute_analyze(&args, &pipeline(MockProvider::default()), &formatter).unwrap();
        assert!(!succeeded);
    }
}
