//! Bus stop display name value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The display name of a bus stop
///
/// Names are stored verbatim. Equality is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use domain::value_objects::StopName;
///
/// let stop = StopName::new("Opp Blk 5").unwrap();
/// assert_eq!(stop.as_str(), "Opp Blk 5");
/// assert_ne!(stop, StopName::new("opp blk 5").unwrap());
/// assert!(StopName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StopName(String);

impl StopName {
    /// Create a new stop name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStopName` if the name is empty or
    /// contains only whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidStopName(
                "stop name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value object, returning the inner string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StopName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StopName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for StopName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
