//! Bus route lookup port
//!
//! Defines the interface for asking the routing backend for a journey.
//! Adapters in the infrastructure layer implement this port over HTTP.

use std::fmt;

use async_trait::async_trait;
use domain::entities::Itinerary;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Origin and destination of a route lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Where the journey starts
    pub origin: GeoLocation,
    /// Where the journey ends
    pub destination: GeoLocation,
}

impl RouteQuery {
    /// Create a new query
    #[must_use]
    pub const fn new(origin: GeoLocation, destination: GeoLocation) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for RouteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) → ({})", self.origin, self.destination)
    }
}

/// Port for route lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePort: Send + Sync {
    /// Fetch and parse the itinerary between two coordinates
    ///
    /// The result is complete or an error; a partially parsed itinerary is
    /// never returned.
    async fn find_route(&self, query: &RouteQuery) -> Result<Itinerary, ApplicationError>;

    /// Check if the routing backend is reachable
    async fn is_available(&self) -> bool;
}
