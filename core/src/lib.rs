//! # diarisk Core
//!
//! Core library for diarisk - a terminal client for a diabetes risk
//! prediction service.
//!
//! This library holds the input record and its field catalogue, the wire
//! types and HTTP client of the prediction service, the form state that
//! drives a submission, and the text rendering of a prediction result.

// Core modules
pub mod config;
pub mod error;
pub mod form;
pub mod predict;
pub mod record;
pub mod render;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use error::{Error, Result, SUBMISSION_FAILED_MESSAGE};
pub use form::{FormState, Submission};
pub use predict::{HttpPredictionClient, PredictionClient, PredictionRequest, PredictionResult, RiskFlag};
pub use record::{Field, InputRecord, Sex};
pub use render::ResultView;

/// Current version of the diarisk-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the level filter; `RUST_LOG` takes precedence over `default_filter`
fn env_filter(default_filter: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter))
}

/// Initialize tracing with a default level, writing to stderr
pub fn init_tracing_to_stderr(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize tracing with a default level, appending to a log file
///
/// Used while a full-screen view owns the terminal.
pub fn init_tracing_to_file(default_filter: &str, path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}
