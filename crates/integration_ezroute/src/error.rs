//! Route client error types

use thiserror::Error;

use crate::retry::Retryable;

/// Errors that can occur while requesting or parsing a route
#[derive(Debug, Error)]
pub enum RouteClientError {
    /// Connection to the routing backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend answered with a non-success HTTP status
    #[error("Request failed with HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the backend)
        retry_after_secs: Option<u64>,
    },

    /// A single attempt exceeded its timeout window
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout window in milliseconds
        timeout_ms: u64,
    },

    /// The backend reported that it could not find a route
    #[error("Route unavailable: {reason}")]
    RouteUnavailable {
        /// The backend's `error` string
        reason: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A route segment could not be turned into a leg
    #[error("Malformed segment {index}: {reason}")]
    MalformedSegment {
        /// Position of the segment in `route.segments`
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Origin or destination rejected before sending
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RouteClientError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. } => {
                true
            },
            Self::RequestFailed { status } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the error came from the transport rather than the payload
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed { .. }
                | Self::RateLimitExceeded { .. }
                | Self::Timeout { .. }
        )
    }
}

impl Retryable for RouteClientError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(RouteClientError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(RouteClientError::Timeout { timeout_ms: 2500 }.is_retryable());
        assert!(RouteClientError::RequestFailed { status: 503 }.is_retryable());
        assert!(
            RouteClientError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!RouteClientError::RequestFailed { status: 404 }.is_retryable());
        assert!(!RouteClientError::MalformedResponse("x".to_string()).is_retryable());
        assert!(
            !RouteClientError::RouteUnavailable {
                reason: "No such route".to_string()
            }
            .is_retryable()
        );
        assert!(
            !RouteClientError::MalformedSegment {
                index: 0,
                reason: "x".to_string()
            }
            .is_retryable()
        );
        assert!(!RouteClientError::InvalidLocation("x".to_string()).is_retryable());
    }

    #[test]
    fn test_transport_classification() {
        assert!(RouteClientError::RequestFailed { status: 404 }.is_transport());
        assert!(RouteClientError::Timeout { timeout_ms: 1 }.is_transport());
        assert!(!RouteClientError::MalformedResponse(String::new()).is_transport());
        assert!(!RouteClientError::ConfigurationError(String::new()).is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = RouteClientError::RouteUnavailable {
            reason: "Unable to locate a bus stop near you.".to_string(),
        };
        assert!(err.to_string().contains("bus stop near you"));

        let err = RouteClientError::Timeout { timeout_ms: 2500 };
        assert!(err.to_string().contains("2500"));

        let err = RouteClientError::RequestFailed { status: 502 };
        assert_eq!(err.to_string(), "Request failed with HTTP 502");
    }
}
