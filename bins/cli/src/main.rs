//! Dispatch settlement CLI
//!
//! Entry point for the `dispatch` command.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dispatch_cli::{Cli, exit_code, run};
use dispatch_shared::{AppConfig, AppError};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for CSV and JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dispatch_core=info,dispatch_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = AppConfig::load()
        .map_err(|e| anyhow::Error::from(AppError::from(e)))
        .and_then(|config| run(&cli, &config, &mut std::io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(code, "{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
