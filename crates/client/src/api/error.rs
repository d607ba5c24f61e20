//! Analytics API client error types.

use std::sync::Arc;

/// Errors from the analytics backend client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Query parameters were malformed before any request was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Authentication failed (invalid or missing token).
    #[error("authentication failed: invalid credentials")]
    AuthError,

    /// Rate limited by the backend (HTTP 429).
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}
