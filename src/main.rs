//! Gleaner CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use gleaner::{GleanerConfig, GleanerError};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GleanerError> {
    let config = load_config()?;
    cli::dispatch(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GleanerConfig, GleanerError> {
    GleanerConfig::load().map_err(|error| GleanerError::Configuration {
        message: error.to_string(),
    })
}
