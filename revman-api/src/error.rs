//! Error types for backend requests

use thiserror::Error;

/// Result type for backend requests
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connection, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with the backend's explanation
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Missing or expired session cookie
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Malformed base URL or path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<Error> for revman_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized(_) => revman_core::Error::Unauthorized,
            Error::Status { status, message } => revman_core::Error::Backend {
                status: Some(status),
                message,
            },
            other => revman_core::Error::backend(other.to_string()),
        }
    }
}
