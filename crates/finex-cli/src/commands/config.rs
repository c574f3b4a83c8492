//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `config` is the configuration loaded from `path`.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", render_config(config, formatter.format())?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
            Ok(())
        }
    }
}

/// Render the configuration with the API key masked.
fn render_config(config: &Config, format: OutputFormat) -> Result<String> {
    let shown = config.redacted();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&shown)?),
        OutputFormat::Text | OutputFormat::Quiet => toml::to_string_pretty(&shown)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e))),
    }
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
