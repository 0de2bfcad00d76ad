//! Bus service number value object
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::BusNumber;
//!
//! let bus = BusNumber::new(11).expect("valid service number");
//! assert_eq!(bus.value(), 11);
//! assert_eq!(bus.to_string(), "11");
//!
//! // Service numbers are strictly positive
//! assert!(BusNumber::new(0).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A positive bus service number
///
/// Two bus numbers are equal iff their numeric values match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BusNumber(u32);

impl BusNumber {
    /// Create a new bus number
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBusNumber` if `value` is zero.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidBusNumber(
                "service number must be positive".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the numeric service number
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BusNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for BusNumber {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusNumber> for u32 {
    fn from(bus: BusNumber) -> Self {
        bus.0
    }
}

impl FromStr for BusNumber {
    type Err = DomainError;

    /// Parse a service number written as plain decimal digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidBusNumber(format!(
                "'{s}' is not a numeric service number"
            )));
        }
        let value = s
            .parse::<u32>()
            .map_err(|e| DomainError::InvalidBusNumber(format!("'{s}': {e}")))?;
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for BusNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
