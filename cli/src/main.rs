//! # diarisk CLI
//!
//! Command-line interface for diarisk - a diabetes risk prediction client.
//!
//! ## Usage
//!
//! - `diarisk` - Open the interactive prediction form
//! - `diarisk predict --set age=52 --set sex=1` - Submit once and print the result
//! - `diarisk fields` - Show the input fields and their ranges
//! - `diarisk ping` - Check that the prediction service is up
//!
//! The interactive form is a terminal UI powered by iocraft.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod interactive;
mod output;

use commands::{fields_command, interactive_command, ping_command, predict_command, PredictArgs};
use config::CliConfigLoader;

/// diarisk - Diabetes risk prediction from the terminal
#[derive(Parser)]
#[command(name = "diarisk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect nutritional and lifestyle inputs and ask a prediction service for a diabetes risk classification")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prediction service base URL override
    #[arg(long, env = "DIARISK_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, env = "DIARISK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one record and print the prediction
    Predict(PredictArgs),

    /// Show the input fields, their units and slider ranges
    Fields,

    /// Check that the prediction service is reachable
    Ping,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(timeout) = cli.timeout_secs {
        loader = loader.with_timeout_override(timeout);
    }

    loader
}

/// Log file used in interactive mode
fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("diarisk")
        .join("diarisk.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    if cli.command.is_none() {
        // The form owns the terminal, so log lines go to a file instead
        let log_path = log_file_path();
        if diarisk_core::init_tracing_to_file(filter, &log_path).is_err() {
            diarisk_core::init_tracing_to_stderr("error");
        }
    } else {
        diarisk_core::init_tracing_to_stderr(filter);
    }

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Predict(args)) => predict_command(config_loader, args).await,
        Some(Commands::Fields) => fields_command().await,
        Some(Commands::Ping) => ping_command(config_loader).await,
        None => interactive_command(config_loader).await,
    }
}
