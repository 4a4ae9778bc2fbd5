//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Request(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered 404.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-success response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
