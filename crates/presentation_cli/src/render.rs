//! Terminal and JSON rendering of route list states

use application::{RouteErrorKind, RouteListState, RouteRow};
use serde_json::{Value, json};

/// Render a settled state as text lines
///
/// Ready states print a summary line followed by one row per leg; failed
/// states print the single user-visible failure message.
#[must_use]
pub fn render_text(state: &RouteListState) -> String {
    match state {
        RouteListState::Loading => "⏳ Loading…".to_string(),
        RouteListState::Ready(itinerary) => {
            let mut lines = vec![itinerary.format_summary()];
            lines.extend(
                itinerary
                    .iter()
                    .map(RouteRow::from)
                    .enumerate()
                    .map(|(i, row)| format!("  {}. {}", i + 1, render_row(&row))),
            );
            lines.join("\n")
        },
        RouteListState::Failed(_) => format!("❌ {}", RouteErrorKind::USER_MESSAGE),
    }
}

/// Render one row as `bus  origin → destination (n stops)`
#[must_use]
pub fn render_row(row: &RouteRow) -> String {
    let stops = if row.stop_count == 1 { "stop" } else { "stops" };
    format!(
        "Bus {:<4} {} → {} ({} {stops})",
        row.bus_number, row.origin, row.destination, row.stop_count
    )
}

/// Render a settled state as a JSON document
#[must_use]
pub fn render_json(state: &RouteListState) -> Value {
    match state {
        RouteListState::Loading => json!({ "status": "loading" }),
        RouteListState::Ready(itinerary) => {
            let rows: Vec<RouteRow> = itinerary.iter().map(RouteRow::from).collect();
            json!({
                "status": "ready",
                "transfers": itinerary.transfers(),
                "total_stops": itinerary.total_stops(),
                "travel_time_minutes": itinerary.travel_time_minutes(),
                "legs": rows,
            })
        },
        RouteListState::Failed(kind) => json!({
            "status": "failed",
            "error": kind,
            "message": RouteErrorKind::USER_MESSAGE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use domain::{BusNumber, Itinerary, Leg, StopName};

    use super::*;

    fn leg(bus: u32, from: &str, to: &str, stops: u32) -> Leg {
        Leg::new(
            BusNumber::new(bus).unwrap(),
            StopName::new(from).unwrap(),
            StopName::new(to).unwrap(),
            stops,
        )
        .unwrap()
    }

    fn ready() -> RouteListState {
        RouteListState::Ready(
            Itinerary::new(vec![
                leg(95, "Opp NUH", "Clementi Stn", 3),
                leg(2, "Clementi Stn", "Changi Airport PTB2", 40),
            ])
            .with_travel_time(64),
        )
    }

    #[test]
    fn text_lists_one_row_per_leg() {
        let text = render_text(&ready());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("95 → 2"));
        assert!(lines[1].contains("Opp NUH → Clementi Stn"));
        assert!(lines[1].contains("3 stops"));
        assert!(lines[2].starts_with("  2. Bus 2"));
    }

    #[test]
    fn text_failure_shows_single_message() {
        let text = render_text(&RouteListState::Failed(RouteErrorKind::MalformedSegment));
        assert_eq!(text, "❌ No route found");
    }

    #[test]
    fn text_empty_itinerary() {
        let text = render_text(&RouteListState::Ready(Itinerary::default()));
        assert_eq!(text, "No bus needed");
    }

    #[test]
    fn row_uses_singular_for_one_stop() {
        let row = RouteRow::from(&leg(5, "A", "A", 1));
        assert!(render_row(&row).ends_with("(1 stop)"));
    }

    #[test]
    fn json_ready_contains_legs() {
        let value = render_json(&ready());
        assert_eq!(value["status"], "ready");
        assert_eq!(value["transfers"], 1);
        assert_eq!(value["total_stops"], 43);
        assert_eq!(value["travel_time_minutes"], 64);
        assert_eq!(value["legs"][0]["bus_number"], "95");
        assert_eq!(value["legs"][1]["destination"], "Changi Airport PTB2");
    }

    #[test]
    fn json_failure_names_kind() {
        let value = render_json(&RouteListState::Failed(RouteErrorKind::NetworkFailure));
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "network_failure");
        assert_eq!(value["message"], "No route found");
    }
}
