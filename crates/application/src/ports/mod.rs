//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod route_port;

#[cfg(test)]
pub use route_port::MockRoutePort;
pub use route_port::{RoutePort, RouteQuery};
