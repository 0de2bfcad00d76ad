//! Ordered sequence of bus legs forming a journey

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Leg;
use crate::value_objects::BusNumber;

/// A complete journey as the legs to ride, in boarding order
///
/// The first leg is boarded first. The order is never changed after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    legs: Vec<Leg>,
    /// Estimated travel time reported by the routing backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    travel_time_minutes: Option<u32>,
}

impl Itinerary {
    /// Create an itinerary from legs in boarding order
    #[must_use]
    pub fn new(legs: Vec<Leg>) -> Self {
        Self {
            legs,
            travel_time_minutes: None,
        }
    }

    /// Attach an estimated travel time
    #[must_use]
    pub fn with_travel_time(mut self, minutes: u32) -> Self {
        self.travel_time_minutes = Some(minutes);
        self
    }

    /// Legs in boarding order
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Estimated travel time in minutes, if the backend reported one
    #[must_use]
    pub const fn travel_time_minutes(&self) -> Option<u32> {
        self.travel_time_minutes
    }

    /// Number of legs
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Whether the journey has no bus legs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Iterate over legs in boarding order
    pub fn iter(&self) -> std::slice::Iter<'_, Leg> {
        self.legs.iter()
    }

    /// Number of bus changes
    #[must_use]
    pub fn transfers(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Sum of stop counts over all legs
    #[must_use]
    pub fn total_stops(&self) -> u32 {
        self.legs.iter().map(Leg::stop_count).sum()
    }

    /// Bus services in the order they are first boarded, without repeats
    #[must_use]
    pub fn distinct_buses(&self) -> Vec<BusNumber> {
        let mut buses: Vec<BusNumber> = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            if !buses.contains(&leg.bus()) {
                buses.push(leg.bus());
            }
        }
        buses
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        if self.legs.is_empty() {
            return String::from("No bus needed");
        }

        let route = self
            .legs
            .iter()
            .map(|leg| leg.bus().to_string())
            .collect::<Vec<_>>()
            .join(" → ");

        let transfers = match self.transfers() {
            0 => String::from("direct"),
            1 => String::from("1 transfer"),
            n => format!("{n} transfers"),
        };

        let time = self
            .travel_time_minutes
            .map(|m| format!(", ~{m}min"))
            .unwrap_or_default();

        format!("🚌 {route} ({transfers}, {} stops{time})", self.total_stops())
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

impl From<Vec<Leg>> for Itinerary {
    fn from(legs: Vec<Leg>) -> Self {
        Self::new(legs)
    }
}

impl FromIterator<Leg> for Itinerary {
    fn from_iter<I: IntoIterator<Item = Leg>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Itinerary {
    type Item = Leg;
    type IntoIter = std::vec::IntoIter<Leg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a Leg;
    type IntoIter = std::slice::Iter<'a, Leg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::StopName;

    fn leg(bus: u32, origin: &str, destination: &str, stop_count: u32) -> Leg {
        Leg::new(
            BusNumber::new(bus).unwrap(),
            StopName::new(origin).unwrap(),
            StopName::new(destination).unwrap(),
            stop_count,
        )
        .unwrap()
    }

    #[test]
    fn keeps_boarding_order() {
        let itinerary = Itinerary::new(vec![leg(11, "A", "B", 3), leg(96, "B", "C", 5)]);
        let buses: Vec<u32> = itinerary.iter().map(|l| l.bus().value()).collect();
        assert_eq!(buses, vec![11, 96]);
    }

    #[test]
    fn transfers_and_stops() {
        let itinerary = Itinerary::new(vec![
            leg(11, "A", "B", 3),
            leg(96, "B", "C", 5),
            leg(11, "C", "D", 2),
        ]);
        assert_eq!(itinerary.len(), 3);
        assert_eq!(itinerary.transfers(), 2);
        assert_eq!(itinerary.total_stops(), 10);
    }

    #[test]
    fn empty_itinerary() {
        let itinerary = Itinerary::default();
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.transfers(), 0);
        assert_eq!(itinerary.total_stops(), 0);
        assert_eq!(itinerary.format_summary(), "No bus needed");
    }

    #[test]
    fn distinct_buses_removes_repeats_in_first_seen_order() {
        let itinerary = Itinerary::new(vec![
            leg(96, "A", "B", 3),
            leg(11, "B", "C", 5),
            leg(96, "C", "D", 2),
        ]);
        let buses: Vec<u32> = itinerary
            .distinct_buses()
            .into_iter()
            .map(BusNumber::value)
            .collect();
        assert_eq!(buses, vec![96, 11]);
    }

    #[test]
    fn format_summary_mentions_route_and_time() {
        let itinerary =
            Itinerary::new(vec![leg(11, "A", "B", 3), leg(96, "B", "C", 5)]).with_travel_time(42);
        let summary = itinerary.format_summary();
        assert!(summary.contains("11 → 96"));
        assert!(summary.contains("1 transfer"));
        assert!(summary.contains("8 stops"));
        assert!(summary.contains("~42min"));

        let direct = Itinerary::new(vec![leg(11, "A", "B", 3)]);
        assert!(direct.format_summary().contains("direct"));
    }

    #[test]
    fn collects_from_iterator() {
        let itinerary: Itinerary = vec![leg(11, "A", "B", 2)].into_iter().collect();
        assert_eq!(itinerary.len(), 1);
        assert_eq!(itinerary.travel_time_minutes(), None);
    }

    #[test]
    fn equality_includes_order() {
        let a = Itinerary::new(vec![leg(11, "A", "B", 3), leg(96, "B", "C", 5)]);
        let b = Itinerary::new(vec![leg(96, "B", "C", 5), leg(11, "A", "B", 3)]);
        assert_ne!(a, b);
    }
}
