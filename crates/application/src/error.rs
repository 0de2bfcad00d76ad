//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while fetching and preparing a route
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Transport failed, timed out, or retries were exhausted
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The backend reported that no route exists
    #[error("Route unavailable: {reason}")]
    RouteUnavailable {
        /// Reason given by the backend
        reason: String,
    },

    /// The response did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A segment of the route could not be turned into a leg
    #[error("Malformed segment {index}: {reason}")]
    MalformedSegment {
        /// Position of the segment in the response
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Origin or destination cannot be routed
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }

    /// Classify the error for display
    pub const fn kind(&self) -> RouteErrorKind {
        match self {
            Self::NetworkFailure(_) | Self::Configuration(_) => RouteErrorKind::NetworkFailure,
            Self::RouteUnavailable { .. } | Self::InvalidLocation(_) | Self::Domain(_) => {
                RouteErrorKind::RouteUnavailable
            },
            Self::MalformedResponse(_) => RouteErrorKind::MalformedResponse,
            Self::MalformedSegment { .. } => RouteErrorKind::MalformedSegment,
        }
    }
}

/// Coarse failure classes shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteErrorKind {
    /// Transport or timeout, after retries
    NetworkFailure,
    /// Backend explicitly found no route
    RouteUnavailable,
    /// Response schema violation
    MalformedResponse,
    /// A single segment violated the schema
    MalformedSegment,
}

impl RouteErrorKind {
    /// Single user-visible message for every failure class
    pub const USER_MESSAGE: &'static str = "No route found";

    /// Short machine-friendly label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NetworkFailure => "network_failure",
            Self::RouteUnavailable => "route_unavailable",
            Self::MalformedResponse => "malformed_response",
            Self::MalformedSegment => "malformed_segment",
        }
    }
}

impl fmt::Display for RouteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_failures_are_retryable() {
        assert!(ApplicationError::NetworkFailure("timeout".to_string()).is_retryable());
        assert!(
            !ApplicationError::RouteUnavailable {
                reason: "x".to_string()
            }
            .is_retryable()
        );
        assert!(!ApplicationError::MalformedResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn kinds() {
        assert_eq!(
            ApplicationError::NetworkFailure(String::new()).kind(),
            RouteErrorKind::NetworkFailure
        );
        assert_eq!(
            ApplicationError::Configuration(String::new()).kind(),
            RouteErrorKind::NetworkFailure
        );
        assert_eq!(
            ApplicationError::InvalidLocation(String::new()).kind(),
            RouteErrorKind::RouteUnavailable
        );
        assert_eq!(
            ApplicationError::from(DomainError::InvalidStopCount(0)).kind(),
            RouteErrorKind::RouteUnavailable
        );
        assert_eq!(
            ApplicationError::MalformedResponse(String::new()).kind(),
            RouteErrorKind::MalformedResponse
        );
        assert_eq!(
            ApplicationError::MalformedSegment {
                index: 2,
                reason: String::new()
            }
            .kind(),
            RouteErrorKind::MalformedSegment
        );
    }

    #[test]
    fn display_includes_details() {
        let err = ApplicationError::MalformedSegment {
            index: 1,
            reason: "only 1 bus stop".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed segment 1: only 1 bus stop");
        assert_eq!(RouteErrorKind::MalformedSegment.to_string(), "malformed_segment");
    }
}
