//! Error types and handling for diarisk core

use thiserror::Error;

/// Result type alias for diarisk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Text shown to the user whenever a submission fails, whatever the cause
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to get prediction. Please try again later.";

/// Main error type for diarisk core
#[derive(Error, Debug)]
pub enum Error {
    /// Field edit errors
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Prediction service request errors
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while editing the input record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    #[error("Value for '{field}' is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("Value for '{field}' must be finite")]
    NotFinite { field: &'static str },

    #[error("Sex must be \"0\" (male) or \"1\" (female), got {value:?}")]
    InvalidSex { value: String },
}

/// Errors raised while talking to the prediction service
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Malformed prediction payload: {message}")]
    Decode { message: String },

    #[error("A submission is already in flight")]
    Busy,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Request(RequestError::Decode {
                message: err.to_string(),
            })
        } else {
            Error::Request(RequestError::Transport {
                message: err.to_string(),
            })
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: err.to_string(),
        })
    }
}
