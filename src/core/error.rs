use std::io;
use thiserror::Error;

/// Unified error type for the littlestep application
#[derive(Error, Debug)]
pub enum StepError {
    /// Generation endpoint errors
    #[error("API error: {0}")]
    Api(String),

    /// Capture source errors (unreadable files, non-image files)
    #[error("Capture error: {0}")]
    Capture(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// History encoding contract violations
    #[error("Encode error: {0}")]
    Encode(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for StepError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StepError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            StepError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            StepError::Api(format!("API returned error status: {}", err))
        } else {
            StepError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for StepError {
    fn from(err: serde_json::Error) -> Self {
        StepError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for StepError {
    fn from(err: serde_yml::Error) -> Self {
        StepError::Serialization(format!("YAML error: {}", err))
    }
}
