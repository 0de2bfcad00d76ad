//! Route adapter - Implements RoutePort using integration_ezroute

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{RoutePort, RouteQuery};
use async_trait::async_trait;
use domain::entities::Itinerary;
use integration_ezroute::{EzRouteClient, EzRouteConfig, RouteClient, RouteClientError};
use tracing::{debug, instrument, warn};

/// Adapter for the EzRoute routing backend
pub struct RouteAdapter {
    client: Arc<dyn RouteClient>,
}

impl std::fmt::Debug for RouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteAdapter")
            .field("client", &"dyn RouteClient")
            .finish()
    }
}

impl RouteAdapter {
    /// Wrap an existing route client
    pub fn new(client: impl RouteClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Build an adapter backed by an [`EzRouteClient`] on the shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the route configuration is invalid.
    pub fn from_config(config: &EzRouteConfig) -> Result<Self, ApplicationError> {
        let client = EzRouteClient::new(config).map_err(map_client_error)?;
        Ok(Self::new(client))
    }
}

/// Map a route client error onto the application error taxonomy
///
/// Every transport error becomes `NetworkFailure`; backend and payload
/// errors keep their meaning.
pub fn map_client_error(err: RouteClientError) -> ApplicationError {
    if err.is_transport() {
        return ApplicationError::NetworkFailure(err.to_string());
    }

    match err {
        RouteClientError::RouteUnavailable { reason } => {
            ApplicationError::RouteUnavailable { reason }
        },
        RouteClientError::MalformedResponse(message) => {
            ApplicationError::MalformedResponse(message)
        },
        RouteClientError::MalformedSegment { index, reason } => {
            ApplicationError::MalformedSegment { index, reason }
        },
        RouteClientError::InvalidLocation(message) => ApplicationError::InvalidLocation(message),
        RouteClientError::ConfigurationError(message) => ApplicationError::Configuration(message),
        transport => ApplicationError::NetworkFailure(transport.to_string()),
    }
}

#[async_trait]
impl RoutePort for RouteAdapter {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn find_route(&self, query: &RouteQuery) -> Result<Itinerary, ApplicationError> {
        let itinerary = self
            .client
            .find_route(&query.origin, &query.destination)
            .await
            .map_err(|e| {
                warn!(error = %e, "Route lookup failed");
                map_client_error(e)
            })?;

        debug!(
            legs = itinerary.len(),
            transfers = itinerary.transfers(),
            "Route lookup complete"
        );
        Ok(itinerary)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
