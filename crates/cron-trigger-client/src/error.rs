//! Client error types

use thiserror::Error;

/// Errors returned by a trigger service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success API response
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Remote resource missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
            || matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
