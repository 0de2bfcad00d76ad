//! EzRoute routing backend integration
//!
//! Looks up bus itineraries between two points in Singapore via the EzRoute
//! `/findroute` endpoint.
//!
//! # Architecture
//!
//! [`RouteClient`] defines the lookup interface and is implemented by
//! [`EzRouteClient`]. Each lookup runs under a [`RetryPolicy`] with a fixed
//! per-attempt timeout, and the response body is turned into a domain
//! [`Itinerary`](domain::Itinerary) by [`RouteResponseParser`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_ezroute::{EzRouteClient, EzRouteConfig, RouteClient};
//!
//! let client = EzRouteClient::new(&EzRouteConfig::default())?;
//!
//! let itinerary = client.find_route(
//!     &GeoLocation::new(1.307873, 103.772014)?, // Kent Ridge
//!     &GeoLocation::new(1.360216, 103.989691)?, // Changi Airport
//! ).await?;
//! ```

mod client;
mod config;
mod error;
mod parser;
mod retry;

pub use client::{EzRouteClient, RouteClient, USER_AGENT, shared_http_client};
pub use config::EzRouteConfig;
pub use error::RouteClientError;
pub use parser::{NO_ERROR, RouteResponseParser};
pub use retry::{RetryPolicy, RetryResult, Retryable, with_retry};
