//! Geographic location value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic location with latitude and longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = DomainError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is never in range).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates { latitude, longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted constants)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A latitude/longitude rectangle, given by its south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    south_west: GeoLocation,
    north_east: GeoLocation,
}

impl GeoBounds {
    /// Create bounds from two corners
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the south-west corner is
    /// not south and west of the north-east corner.
    pub fn new(south_west: GeoLocation, north_east: GeoLocation) -> Result<Self, DomainError> {
        if south_west.latitude > north_east.latitude || south_west.longitude > north_east.longitude
        {
            return Err(DomainError::ValidationError(format!(
                "bounds corners are inverted: SW ({south_west}) / NE ({north_east})"
            )));
        }
        Ok(Self {
            south_west,
            north_east,
        })
    }

    /// The area served by the routing backend
    #[must_use]
    pub const fn singapore() -> Self {
        Self {
            south_west: GeoLocation::new_unchecked(1.130_475_3, 103.692_035_9),
            north_east: GeoLocation::new_unchecked(1.450_475_3, 104.012_035_9),
        }
    }

    /// South-west corner
    #[must_use]
    pub const fn south_west(&self) -> GeoLocation {
        self.south_west
    }

    /// North-east corner
    #[must_use]
    pub const fn north_east(&self) -> GeoLocation {
        self.north_east
    }

    /// Whether the location lies inside the rectangle (edges inclusive)
    #[must_use]
    pub fn contains(&self, location: &GeoLocation) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&location.latitude)
            && (self.south_west.longitude..=self.north_east.longitude)
                .contains(&location.longitude)
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] – [{}]", self.south_west, self.north_east)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(1.307_873, 103.772_014).expect("valid coordinates");
        assert!((loc.latitude() - 1.307_873).abs() < f64::EPSILON);
        assert!((loc.longitude() - 103.772_014).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::new(1.36, 103.99).expect("valid");
        assert_eq!(loc.to_string(), "1.360000, 103.990000");
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: GeoLocation =
            serde_json::from_str(r#"{"latitude":1.3,"longitude":103.8}"#).expect("valid");
        assert!((ok.latitude() - 1.3).abs() < f64::EPSILON);

        let bad = serde_json::from_str::<GeoLocation>(r#"{"latitude":100.0,"longitude":0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_singapore_bounds() {
        let sg = GeoBounds::singapore();
        let clementi = GeoLocation::new(1.307_873, 103.772_014).expect("valid");
        let changi = GeoLocation::new(1.360_216, 103.989_691).expect("valid");
        let berlin = GeoLocation::new(52.52, 13.405).expect("valid");

        assert!(sg.contains(&clementi));
        assert!(sg.contains(&changi));
        assert!(!sg.contains(&berlin));
        assert!(sg.contains(&sg.south_west()));
        assert!(sg.contains(&sg.north_east()));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let a = GeoLocation::new(1.0, 103.0).expect("valid");
        let b = GeoLocation::new(2.0, 104.0).expect("valid");
        assert!(GeoBounds::new(a, b).is_ok());
        assert!(GeoBounds::new(b, a).is_err());
    }
}
