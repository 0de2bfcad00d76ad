//! View model for the bus route list screen
//!
//! Holds the outcome of a single route lookup and publishes it to the display
//! layer. The state only moves forward: `Loading` ends in either `Ready` or
//! `Failed`, and going back to `Loading` requires a fresh [`request`].
//!
//! Results are delivered through a `tokio::sync::watch` channel, so every
//! state change is serialized with respect to readers. Tearing the view model
//! down aborts the in-flight request and freezes the state.
//!
//! [`request`]: RouteListViewModel::request

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use domain::entities::{Itinerary, Leg};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::{ApplicationError, RouteErrorKind};
use crate::ports::{RoutePort, RouteQuery};

/// What the route list screen currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteListState {
    /// A request is in flight (or has not been started yet)
    Loading,
    /// The itinerary to display
    Ready(Itinerary),
    /// The request failed; the screen shows a single failure message
    Failed(RouteErrorKind),
}

impl RouteListState {
    /// Whether the request has not settled yet
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The itinerary, if the request succeeded
    #[must_use]
    pub const fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            Self::Ready(itinerary) => Some(itinerary),
            _ => None,
        }
    }

    /// The failure class, if the request failed
    #[must_use]
    pub const fn error_kind(&self) -> Option<RouteErrorKind> {
        match self {
            Self::Failed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// User-visible failure text
    #[must_use]
    pub const fn failure_message(&self) -> Option<&'static str> {
        match self {
            Self::Failed(_) => Some(RouteErrorKind::USER_MESSAGE),
            _ => None,
        }
    }
}

/// One row of the route list: which bus to take, from where, to where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRow {
    /// Bus service number
    pub bus_number: String,
    /// Boarding stop
    pub origin: String,
    /// Alighting stop
    pub destination: String,
    /// Stops on this ride, both ends included
    pub stop_count: u32,
}

impl From<&Leg> for RouteRow {
    fn from(leg: &Leg) -> Self {
        Self {
            bus_number: leg.bus().to_string(),
            origin: leg.origin().to_string(),
            destination: leg.destination().to_string(),
            stop_count: leg.stop_count(),
        }
    }
}

#[derive(Debug)]
struct Shared {
    state: watch::Sender<RouteListState>,
    /// Incremented by every `request`; results from older requests are dropped
    generation: AtomicU64,
    torn_down: AtomicBool,
}

impl Shared {
    fn apply(&self, generation: u64, result: Result<Itinerary, ApplicationError>) -> bool {
        let next = match result {
            Ok(itinerary) => {
                info!(legs = itinerary.len(), "Route ready");
                RouteListState::Ready(itinerary)
            },
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Route request failed");
                RouteListState::Failed(e.kind())
            },
        };

        // Checked under the channel's write lock so teardown cannot interleave.
        self.state.send_if_modified(|state| {
            if self.torn_down.load(Ordering::SeqCst) {
                debug!("Result arrived after teardown, dropped");
                return false;
            }
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "Result from superseded request, dropped");
                return false;
            }
            if !state.is_loading() {
                debug!("Result arrived after the state settled, dropped");
                return false;
            }
            *state = next;
            true
        })
    }
}

/// State holder for one route list screen
#[derive(Debug)]
pub struct RouteListViewModel {
    shared: Arc<Shared>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl Default for RouteListViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteListViewModel {
    /// Create a view model in the `Loading` state
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(RouteListState::Loading);
        Self {
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
            }),
            in_flight: Mutex::new(None),
        }
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> RouteListState {
        self.shared.state.borrow().clone()
    }

    /// Observe state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RouteListState> {
        self.shared.state.subscribe()
    }

    /// Whether `teardown` has run
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.shared.torn_down.load(Ordering::SeqCst)
    }

    /// Start a fresh lookup on the current tokio runtime
    ///
    /// Cancels any lookup still in flight, resets the state to `Loading`, and
    /// spawns the request. Must be called from within a tokio runtime.
    #[instrument(skip(self, port, query), fields(query = %query))]
    pub fn request(&self, port: Arc<dyn RoutePort>, query: RouteQuery) {
        if self.is_torn_down() {
            warn!("Ignoring route request on a torn-down view model");
            return;
        }

        let mut in_flight = self.in_flight.lock();
        if let Some(previous) = in_flight.take() {
            debug!("Cancelling previous route request");
            previous.abort();
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.state.send_replace(RouteListState::Loading);

        let shared = Arc::clone(&self.shared);
        *in_flight = Some(tokio::spawn(async move {
            let result = port.find_route(&query).await;
            shared.apply(generation, result);
        }));
    }

    /// Deliver a result produced outside [`request`](Self::request)
    ///
    /// Returns `false` when the result was ignored because the state already
    /// settled or the view model was torn down.
    pub fn apply(&self, result: Result<Itinerary, ApplicationError>) -> bool {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        self.shared.apply(generation, result)
    }

    /// Wait until the state leaves `Loading`
    ///
    /// Returns `None` if the view model is torn down first.
    pub async fn settled(&self) -> Option<RouteListState> {
        let mut rx = self.subscribe();
        loop {
            if self.is_torn_down() {
                return None;
            }
            {
                let state = rx.borrow_and_update();
                if !state.is_loading() {
                    return Some(state.clone());
                }
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }

    /// Display rows for the current itinerary, if there is one
    #[must_use]
    pub fn rows(&self) -> Option<Vec<RouteRow>> {
        self.shared
            .state
            .borrow()
            .itinerary()
            .map(|itinerary| itinerary.iter().map(RouteRow::from).collect())
    }

    /// Abort the in-flight request and stop accepting results
    pub fn teardown(&self) {
        if self.shared.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.in_flight.lock().take() {
            handle.abort();
        }
        // Wake `settled` waiters without changing the state.
        self.shared.state.send_modify(|_| {});
        debug!("Route list view model torn down");
    }
}

impl Drop for RouteListViewModel {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use domain::value_objects::{BusNumber, GeoLocation, StopName};
    use tokio::sync::Notify;

    use super::*;
    use crate::ports::MockRoutePort;

    fn query() -> RouteQuery {
        RouteQuery::new(
            GeoLocation::new(1.307_873, 103.772_014).unwrap(),
            GeoLocation::new(1.360_216, 103.989_691).unwrap(),
        )
    }

    fn leg(bus: u32, origin: &str, destination: &str, stop_count: u32) -> Leg {
        Leg::new(
            BusNumber::new(bus).unwrap(),
            StopName::new(origin).unwrap(),
            StopName::new(destination).unwrap(),
            stop_count,
        )
        .unwrap()
    }

    fn sample_itinerary() -> Itinerary {
        Itinerary::new(vec![leg(11, "A", "C", 3), leg(96, "C", "E", 4)])
    }

    /// Port that blocks until released
    struct GatedPort {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl RoutePort for GatedPort {
        async fn find_route(&self, _query: &RouteQuery) -> Result<Itinerary, ApplicationError> {
            self.gate.notified().await;
            Ok(sample_itinerary())
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn starts_loading() {
        let vm = RouteListViewModel::new();
        assert_eq!(vm.state(), RouteListState::Loading);
        assert!(vm.rows().is_none());
        assert!(!vm.is_torn_down());
    }

    #[tokio::test]
    async fn successful_request_becomes_ready() {
        let mut mock = MockRoutePort::new();
        mock.expect_find_route()
            .times(1)
            .returning(|_| Ok(sample_itinerary()));

        let vm = RouteListViewModel::new();
        vm.request(Arc::new(mock), query());

        let state = vm.settled().await.unwrap();
        assert_eq!(state, RouteListState::Ready(sample_itinerary()));

        let rows = vm.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bus_number, "11");
        assert_eq!(rows[0].origin, "A");
        assert_eq!(rows[0].destination, "C");
        assert_eq!(rows[1].bus_number, "96");
    }

    #[tokio::test]
    async fn failed_request_becomes_failed_with_kind() {
        let mut mock = MockRoutePort::new();
        mock.expect_find_route().times(1).returning(|_| {
            Err(ApplicationError::RouteUnavailable {
                reason: "Unable to locate a bus stop near you.".to_string(),
            })
        });

        let vm = RouteListViewModel::new();
        vm.request(Arc::new(mock), query());

        let state = vm.settled().await.unwrap();
        assert_eq!(state.error_kind(), Some(RouteErrorKind::RouteUnavailable));
        assert_eq!(state.failure_message(), Some("No route found"));
        assert!(vm.rows().is_none());
    }

    #[test]
    fn settled_state_ignores_later_results() {
        let vm = RouteListViewModel::new();
        assert!(vm.apply(Ok(sample_itinerary())));
        assert!(!vm.apply(Err(ApplicationError::NetworkFailure("late".to_string()))));
        assert_eq!(vm.state(), RouteListState::Ready(sample_itinerary()));
    }

    #[test]
    fn failure_is_terminal() {
        let vm = RouteListViewModel::new();
        assert!(vm.apply(Err(ApplicationError::MalformedResponse("x".to_string()))));
        assert!(!vm.apply(Ok(sample_itinerary())));
        assert_eq!(
            vm.state(),
            RouteListState::Failed(RouteErrorKind::MalformedResponse)
        );
    }

    #[tokio::test]
    async fn teardown_prevents_updates() {
        let gate = Arc::new(Notify::new());
        let vm = RouteListViewModel::new();
        vm.request(
            Arc::new(GatedPort {
                gate: Arc::clone(&gate),
            }),
            query(),
        );

        vm.teardown();
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(vm.is_torn_down());
        assert_eq!(vm.state(), RouteListState::Loading);
        assert!(vm.settled().await.is_none());
        assert!(!vm.apply(Ok(sample_itinerary())));
    }

    #[tokio::test]
    async fn teardown_wakes_waiters() {
        let gate = Arc::new(Notify::new());
        let vm = Arc::new(RouteListViewModel::new());
        vm.request(Arc::new(GatedPort { gate }), query());

        let waiter = {
            let vm = Arc::clone(&vm);
            tokio::spawn(async move { vm.settled().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        vm.teardown();

        let outcome = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .expect("waiter did not panic");
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn new_request_supersedes_in_flight_one() {
        let gate = Arc::new(Notify::new());
        let vm = RouteListViewModel::new();
        vm.request(
            Arc::new(GatedPort {
                gate: Arc::clone(&gate),
            }),
            query(),
        );

        let mut mock = MockRoutePort::new();
        mock.expect_find_route()
            .times(1)
            .returning(|_| Ok(Itinerary::new(vec![leg(7, "X", "Y", 2)])));
        vm.request(Arc::new(mock), query());

        let state = vm.settled().await.unwrap();
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(state.itinerary().unwrap().legs()[0].bus().value(), 7);
        assert_eq!(vm.state(), state);
    }

    #[tokio::test]
    async fn fresh_request_returns_to_loading() {
        let vm = RouteListViewModel::new();
        assert!(vm.apply(Err(ApplicationError::NetworkFailure("down".to_string()))));

        let gate = Arc::new(Notify::new());
        vm.request(Arc::new(GatedPort { gate }), query());
        assert_eq!(vm.state(), RouteListState::Loading);
    }

    #[tokio::test]
    async fn subscribers_see_transition() {
        let mut mock = MockRoutePort::new();
        mock.expect_find_route()
            .returning(|_| Ok(sample_itinerary()));

        let vm = RouteListViewModel::new();
        let mut rx = vm.subscribe();
        vm.request(Arc::new(mock), query());

        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .expect("sender alive")
            .clone();
        assert!(state.itinerary().is_some());
    }
}
