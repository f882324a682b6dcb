//! Error taxonomy for upstream calls
//!
//! Hard failures (transport, non-success status, undecodable bodies) are
//! propagated to the caller. `NotConfigured` is kept apart from real failures
//! so handlers can render "not available" instead of "error".

/// Errors produced while talking to the platform or observer APIs
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0} is not configured")]
    NotConfigured(String),
}

impl PlatformError {
    /// Upstream HTTP status, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Status { status, .. } => Some(*status),
            PlatformError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, PlatformError::NotConfigured(_))
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_extraction() {
        let err = PlatformError::Status {
            url: "http://platform/namespaces".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_configured());

        let err = PlatformError::NotFound {
            url: "http://platform/namespaces/x".to_string(),
        };
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_not_configured_is_distinct() {
        let err = PlatformError::NotConfigured("observer".to_string());
        assert!(err.is_not_configured());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "observer is not configured");
    }
}
