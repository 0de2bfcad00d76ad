//! Domain layer for EzRoute
//!
//! Contains the bus journey model: service numbers, stop names, legs, and
//! itineraries, plus the coordinate types the routing backend is queried with.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
