//! Finex CLI - Extract key fields from financial report PDFs.

use clap::Parser;
use finex_cli::commands;
use finex_cli::{Cli, Command, Config, Formatter};
use finex_extractor::Pipeline;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> finex_cli::Result<ExitCode> {
    let Cli {
        format,
        no_color,
        config: config_path,
        api_key,
        model,
        command,
        ..
    } = cli;

    let config_path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let format = format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let succeeded = match command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
            true
        }
        Command::CheckApi => {
            let client =
                commands::build_field_extractor(&config, api_key.as_deref(), model.as_deref())?;
            commands::execute_check_api(&client, &formatter)?
        }
        Command::Analyze(args) => {
            let client =
                commands::build_field_extractor(&config, api_key.as_deref(), model.as_deref())?;
            let pipeline = Pipeline::new(client, &config.pipeline)?;
            commands::execute_analyze(&args, &pipeline, &formatter)?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
