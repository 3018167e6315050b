//! fileman: WebDAV file-manager client.
//!
//! Loads configuration, initialises logging and hands the parsed command to
//! the CLI crate.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use fileman_cli::Cli;
use fileman_cli::output;
use fileman_core::config::AppConfig;
use fileman_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute_with(config).await {
        tracing::error!(kind = ?e.kind, "Command failed: {}", e);
        output::print_error(&e.message);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
///
/// `FILEMAN_CONFIG` takes the place of `--config` when set.
fn load_configuration(cli_path: &str) -> Result<AppConfig, AppError> {
    let config_path = std::env::var("FILEMAN_CONFIG").unwrap_or_else(|_| cli_path.to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
