//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Bus service number is not a positive integer
    #[error("Invalid bus number: {0}")]
    InvalidBusNumber(String),

    /// Bus stop name is empty
    #[error("Invalid stop name: {0}")]
    InvalidStopName(String),

    /// A leg must visit at least one stop
    #[error("Invalid stop count {0}: a leg covers at least one stop")]
    InvalidStopCount(u32),

    /// Coordinates out of range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
