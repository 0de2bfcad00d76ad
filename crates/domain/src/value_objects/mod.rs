//! Value Objects - Immutable, identity-less domain primitives

mod bus_number;
mod geo_location;
mod stop_name;

pub use bus_number::BusNumber;
pub use geo_location::{GeoBounds, GeoLocation};
pub use stop_name::StopName;
