//! Publish error types

use thiserror::Error;

/// Result type for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Publishing-related errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// No access token was provided
    #[error("Missing access token: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// Repository slug is not `owner/name`
    #[error("Invalid repository '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    /// API error from the hosting platform
    #[error("{context}: {status} - {message}")]
    Api {
        context: String,
        status: u16,
        message: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
