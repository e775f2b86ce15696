//! Minimal configuration module for diarisk core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{ServiceConfig, DEFAULT_BASE_URL, PREDICT_PATH};
