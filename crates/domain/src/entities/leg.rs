//! A single bus ride within a journey

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{BusNumber, StopName};

/// One bus segment of a journey: board `bus` at `origin`, alight at `destination`
///
/// `stop_count` counts every stop served on the ride, origin and destination
/// included, so it is never zero. Two legs are equal only if all four fields
/// are equal.
///
/// # Examples
///
/// ```
/// use domain::entities::Leg;
/// use domain::value_objects::{BusNumber, StopName};
///
/// let leg = Leg::new(
///     BusNumber::new(11).unwrap(),
///     StopName::new("A").unwrap(),
///     StopName::new("C").unwrap(),
///     3,
/// )
/// .unwrap();
/// assert_eq!(leg.stops_travelled(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLeg")]
pub struct Leg {
    bus: BusNumber,
    origin: StopName,
    destination: StopName,
    stop_count: u32,
}

#[derive(Deserialize)]
struct RawLeg {
    bus: BusNumber,
    origin: StopName,
    destination: StopName,
    stop_count: u32,
}

impl TryFrom<RawLeg> for Leg {
    type Error = DomainError;

    fn try_from(raw: RawLeg) -> Result<Self, Self::Error> {
        Self::new(raw.bus, raw.origin, raw.destination, raw.stop_count)
    }
}

impl Leg {
    /// Create a new leg
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStopCount` if `stop_count` is zero.
    pub fn new(
        bus: BusNumber,
        origin: StopName,
        destination: StopName,
        stop_count: u32,
    ) -> Result<Self, DomainError> {
        if stop_count == 0 {
            return Err(DomainError::InvalidStopCount(stop_count));
        }
        Ok(Self {
            bus,
            origin,
            destination,
            stop_count,
        })
    }

    /// Bus service to board
    #[must_use]
    pub const fn bus(&self) -> BusNumber {
        self.bus
    }

    /// Boarding stop
    #[must_use]
    pub const fn origin(&self) -> &StopName {
        &self.origin
    }

    /// Alighting stop
    #[must_use]
    pub const fn destination(&self) -> &StopName {
        &self.destination
    }

    /// Number of stops on the ride, including both ends
    #[must_use]
    pub const fn stop_count(&self) -> u32 {
        self.stop_count
    }

    /// Number of stops the rider passes after boarding
    #[must_use]
    pub const fn stops_travelled(&self) -> u32 {
        self.stop_count.saturating_sub(1)
    }

    /// Format as a single display row
    #[must_use]
    pub fn format_row(&self) -> String {
        let stops = if self.stop_count == 1 { "stop" } else { "stops" };
        format!(
            "🚌 {} {} → {} ({} {stops})",
            self.bus, self.origin, self.destination, self.stop_count
        )
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_row())
    }
}
