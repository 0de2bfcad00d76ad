//! Domain Entities - Values assembled from a routing response

mod itinerary;
mod leg;

pub use itinerary::Itinerary;
pub use leg::Leg;
