//! Application layer - Use cases and orchestration
//!
//! Defines the route lookup port and the view model that turns a lookup
//! result into display state. Infrastructure adapters plug in behind the port.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, RouteErrorKind};
pub use ports::*;
pub use services::*;
