//! `/findroute` response parsing
//!
//! Turns the backend's JSON payload into an [`Itinerary`]. The whole payload
//! is validated before the itinerary is built, so callers either get every
//! leg or an error.
//!
//! Expected shape:
//!
//! ```text
//! { "error": "none",
//!   "route": { "travelTime": 42,
//!              "segments": [ { "busService": { "ServiceNo": 11 },
//!                              "busStops": [ { "Description": "A" }, ... ] } ] } }
//! ```

use domain::entities::{Itinerary, Leg};
use domain::value_objects::{BusNumber, StopName};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::RouteClientError;

/// Value of `error` when the backend found a route
pub const NO_ERROR: &str = "none";

/// Stateless parser for `/findroute` responses
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteResponseParser;

impl RouteResponseParser {
    /// Parse a raw response body
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the body is not JSON or a field is missing or mistyped
    /// - `RouteUnavailable` if the backend reported an error
    /// - `MalformedSegment` if a segment has fewer than two stops or invalid values
    pub fn parse(body: &str) -> Result<Itinerary, RouteClientError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RouteClientError::MalformedResponse(format!("invalid JSON: {e}")))?;
        Self::parse_value(&value)
    }

    /// Parse an already-decoded JSON document
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_value(value: &Value) -> Result<Itinerary, RouteClientError> {
        let status = value
            .get("error")
            .ok_or_else(|| malformed("missing field `error`"))?
            .as_str()
            .ok_or_else(|| malformed("field `error` is not a string"))?;

        if status != NO_ERROR {
            debug!(reason = status, "Backend reported no route");
            return Err(RouteClientError::RouteUnavailable {
                reason: status.to_string(),
            });
        }

        let route = match value.get("route") {
            None | Some(Value::Null) => return Err(malformed("missing field `route`")),
            Some(route) => route,
        };

        let raw = RawRoute::deserialize(route)
            .map_err(|e| RouteClientError::MalformedResponse(format!("route: {e}")))?;

        let legs = raw
            .segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| convert_segment(index, segment))
            .collect::<Result<Vec<_>, _>>()?;

        let mut itinerary = Itinerary::new(legs);
        if let Some(minutes) = raw.travel_time.and_then(travel_minutes) {
            itinerary = itinerary.with_travel_time(minutes);
        }

        debug!(legs = itinerary.len(), "Parsed route response");
        Ok(itinerary)
    }
}

fn malformed(message: &str) -> RouteClientError {
    RouteClientError::MalformedResponse(message.to_string())
}

fn segment_error(index: usize, reason: impl Into<String>) -> RouteClientError {
    RouteClientError::MalformedSegment {
        index,
        reason: reason.into(),
    }
}

fn convert_segment(index: usize, segment: RawSegment) -> Result<Leg, RouteClientError> {
    let bus = convert_service_no(index, segment.bus_service.service_no)?;

    let stop_count = segment.bus_stops.len();
    if stop_count < 2 {
        return Err(segment_error(
            index,
            format!("expected at least 2 bus stops, got {stop_count}"),
        ));
    }

    let mut stops = segment.bus_stops.into_iter();
    let first = stops.next().map(|s| s.description);
    let last = stops.next_back().map(|s| s.description);
    let (Some(first), Some(last)) = (first, last) else {
        return Err(segment_error(index, "bus stop list ended early"));
    };

    let origin = StopName::new(first).map_err(|e| segment_error(index, e.to_string()))?;
    let destination = StopName::new(last).map_err(|e| segment_error(index, e.to_string()))?;
    let stop_count = u32::try_from(stop_count)
        .map_err(|_| segment_error(index, "too many bus stops"))?;

    Leg::new(bus, origin, destination, stop_count).map_err(|e| segment_error(index, e.to_string()))
}

fn convert_service_no(index: usize, raw: RawServiceNo) -> Result<BusNumber, RouteClientError> {
    match raw {
        RawServiceNo::Number(n) => {
            let n = u32::try_from(n)
                .map_err(|_| segment_error(index, format!("service number {n} out of range")))?;
            BusNumber::new(n).map_err(|e| segment_error(index, e.to_string()))
        },
        RawServiceNo::Text(s) => {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RouteClientError::MalformedResponse(format!(
                    "segment {index}: ServiceNo '{s}' is not numeric"
                )));
            }
            s.parse::<BusNumber>()
                .map_err(|e| segment_error(index, e.to_string()))
        },
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn travel_minutes(raw: f64) -> Option<u32> {
    if raw.is_finite() && raw >= 0.0 {
        Some(raw.round().min(f64::from(u32::MAX)) as u32)
    } else {
        None
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRoute {
    segments: Vec<RawSegment>,
    #[serde(rename = "travelTime", default)]
    travel_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(rename = "busService")]
    bus_service: RawBusService,
    #[serde(rename = "busStops")]
    bus_stops: Vec<RawBusStop>,
}

#[derive(Debug, Deserialize)]
struct RawBusService {
    #[serde(rename = "ServiceNo")]
    service_no: RawServiceNo,
}

/// The backend stores service numbers as strings; integers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawServiceNo {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawBusStop {
    #[serde(rename = "Description")]
    description: String,
}
