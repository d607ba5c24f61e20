//! Unified error types for meup.
//!
//! Display strings carry stable uppercase tags so log lines and CLI output
//! can be grepped by failure class.

/// Unified error type for the meup pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration failed to load or validate.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// A date string or date pair was malformed.
    #[error("INVALID_DATE: {0}")]
    InvalidDate(String),

    /// Upstream API reported an error.
    #[error("API_ERROR: {0}")]
    Api(String),

    /// Upstream returned HTTP 429; the caller-side cooldown is active.
    #[error("RATE_LIMITED: retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Api("status 500".to_string());
        assert!(err.to_string().contains("API_ERROR"));
        assert!(err.to_string().contains("status 500"));
    }

    #[test]
    fn test_rate_limited_display() {
        let err = Error::RateLimited { retry_after_secs: 42 };
        assert_eq!(err.to_string(), "RATE_LIMITED: retry in 42s");
    }

    #[test]
    fn test_invalid_date_display() {
        let err = Error::InvalidDate("expected YYYY-MM-DD".to_string());
        assert_eq!(err.to_string(), "INVALID_DATE: expected YYYY-MM-DD");
    }
}
