//! Lending API error types
use lendflow_core::FallbackReason;
use thiserror::Error;

/// Result type for lending API operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while talking to the external lending API
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(self, StoreError::Network(_) | StoreError::Timeout)
    }

    /// Upstream status code behind this error, if the API answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            StoreError::Unauthorized(_) => Some(401),
            StoreError::Forbidden(_) => Some(403),
            StoreError::NotFound(_) => Some(404),
            StoreError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The fallback reason recorded when this error triggers a fabricated record
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            StoreError::Timeout => FallbackReason::Timeout,
            StoreError::Network(msg) => FallbackReason::Unreachable(msg.clone()),
            StoreError::InvalidResponse(msg) => FallbackReason::MalformedResponse(msg.clone()),
            StoreError::Configuration(_) => FallbackReason::NotConfigured,
            other => FallbackReason::UpstreamStatus(other.upstream_status().unwrap_or(500)),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status() {
        assert_eq!(StoreError::Unauthorized("x".into()).upstream_status(), Some(401));
        assert_eq!(StoreError::Forbidden("x".into()).upstream_status(), Some(403));
        assert_eq!(StoreError::NotFound("x".into()).upstream_status(), Some(404));
        assert_eq!(
            StoreError::Http { status: 422, message: "x".into() }.upstream_status(),
            Some(422)
        );
        assert_eq!(StoreError::Timeout.upstream_status(), None);
    }

    #[test]
    fn test_fallback_reason() {
        assert_eq!(StoreError::Timeout.fallback_reason(), FallbackReason::Timeout);
        assert_eq!(
            StoreError::config("unset").fallback_reason(),
            FallbackReason::NotConfigured
        );
        assert_eq!(
            StoreError::Http { status: 500, message: "boom".into() }.fallback_reason(),
            FallbackReason::UpstreamStatus(500)
        );
        assert!(StoreError::Network("refused".into()).is_network_error());
    }
}
