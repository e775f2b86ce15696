//! Resolved configuration types for diarisk core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Address of the local prediction service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the prediction endpoint, relative to the base URL
pub const PREDICT_PATH: &str = "predict";

/// A fully resolved prediction service configuration ready for use by core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service
    pub base_url: String,
    /// Optional per-request timeout; none by default
    #[serde(default)]
    pub timeout: Option<Duration>,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}

impl ServiceConfig {
    /// Create a new service config
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: None,
            headers: HashMap::new(),
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// URL of `POST /predict`
    pub fn predict_url(&self) -> Result<Url, url::ParseError> {
        self.base()?.join(PREDICT_PATH)
    }

    /// URL of the `GET /` health check
    pub fn health_url(&self) -> Result<Url, url::ParseError> {
        self.base()
    }

    /// Base URL with a trailing slash so relative joins append
    fn base(&self) -> Result<Url, url::ParseError> {
        let trimmed = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{}/", trimmed))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if let Err(e) = self.base() {
            return Err(format!("Base URL is not a valid URL: {}", e));
        }

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err("Timeout must be greater than zero".to_string());
            }
        }

        Ok(())
    }
}
