//! EzRoute HTTP client
//!
//! Issues `GET /findroute` lookups against the routing backend and hands the
//! body to [`RouteResponseParser`]. Transport failures are retried under the
//! configured [`RetryPolicy`](crate::RetryPolicy); backend and payload errors
//! are not.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use domain::entities::Itinerary;
use domain::value_objects::{GeoBounds, GeoLocation};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::EzRouteConfig;
use crate::error::RouteClientError;
use crate::parser::RouteResponseParser;
use crate::retry::with_retry;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("ezroute/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Process-wide HTTP client shared by every [`EzRouteClient`]
///
/// Built on first use. Per-attempt timeouts are applied on each request, so
/// the shared client only carries the connect timeout.
///
/// # Errors
///
/// Returns `ConfigurationError` if the TLS backend cannot be initialized.
pub fn shared_http_client() -> Result<Client, RouteClientError> {
    if let Some(client) = SHARED_CLIENT.get() {
        return Ok(client.clone());
    }

    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| RouteClientError::ConfigurationError(e.to_string()))?;

    Ok(SHARED_CLIENT.get_or_init(|| client).clone())
}

/// Trait for route lookup clients
#[async_trait]
pub trait RouteClient: Send + Sync {
    /// Find a bus itinerary from `origin` to `destination`
    async fn find_route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<Itinerary, RouteClientError>;

    /// Check if the routing backend is reachable
    async fn is_healthy(&self) -> bool;
}

/// Client for the EzRoute `/findroute` backend
#[derive(Debug, Clone)]
pub struct EzRouteClient {
    client: Client,
    config: EzRouteConfig,
    endpoint: Url,
}

impl EzRouteClient {
    /// Create a client backed by the shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid or the
    /// HTTP client cannot be initialized.
    pub fn new(config: &EzRouteConfig) -> Result<Self, RouteClientError> {
        Self::with_http_client(shared_http_client()?, config)
    }

    /// Create a client around an existing HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn with_http_client(client: Client, config: &EzRouteConfig) -> Result<Self, RouteClientError> {
        config
            .validate()
            .map_err(RouteClientError::ConfigurationError)?;
        let endpoint = config
            .findroute_url()
            .map_err(RouteClientError::ConfigurationError)?;

        Ok(Self {
            client,
            config: config.clone(),
            endpoint,
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &EzRouteConfig {
        &self.config
    }

    /// Build the lookup URL
    ///
    /// Parameters are sent longitude first, in the order
    /// `originlong`, `originlat`, `destlong`, `destlat`.
    #[must_use]
    pub fn build_url(&self, origin: &GeoLocation, destination: &GeoLocation) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("originlong", &origin.longitude().to_string())
            .append_pair("originlat", &origin.latitude().to_string())
            .append_pair("destlong", &destination.longitude().to_string())
            .append_pair("destlat", &destination.latitude().to_string());
        url
    }

    fn check_service_area(&self, label: &str, location: &GeoLocation) -> Result<(), RouteClientError> {
        if !self.config.restrict_to_service_area {
            return Ok(());
        }

        let bounds = GeoBounds::singapore();
        if bounds.contains(location) {
            Ok(())
        } else {
            Err(RouteClientError::InvalidLocation(format!(
                "{label} {location} is outside the service area {bounds}"
            )))
        }
    }

    fn map_send_error(&self, err: &reqwest::Error) -> RouteClientError {
        if err.is_timeout() {
            RouteClientError::Timeout {
                timeout_ms: self.config.retry.timeout_ms,
            }
        } else {
            RouteClientError::ConnectionFailed(err.to_string())
        }
    }

    /// Run a single attempt and return the raw body
    async fn fetch_once(&self, url: &Url) -> Result<String, RouteClientError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.retry.timeout())
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RouteClientError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(RouteClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.map_send_error(&e))
    }
}

#[async_trait]
impl RouteClient for EzRouteClient {
    #[instrument(skip(self, origin, destination), fields(origin = %origin, destination = %destination))]
    async fn find_route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<Itinerary, RouteClientError> {
        self.check_service_area("origin", origin)?;
        self.check_service_area("destination", destination)?;

        let url = self.build_url(origin, destination);
        debug!(%url, "Requesting route");

        let outcome = with_retry(&self.config.retry, || self.fetch_once(&url)).await;
        let attempts = outcome.attempts;
        let body = outcome.into_result().inspect_err(|e| {
            warn!(error = %e, attempts, "Route request failed");
        })?;

        let itinerary = RouteResponseParser::parse(&body)?;

        if itinerary.is_empty() {
            warn!("Backend returned a route without segments");
        }

        debug!(legs = itinerary.len(), attempts, "Route found");
        Ok(itinerary)
    }

    async fn is_healthy(&self) -> bool {
        match self
            .client
            .get(self.endpoint.clone())
            .timeout(self.config.retry.timeout())
            .send()
            .await
        {
            Ok(response) => !response.status().is_server_error(),
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            },
        }
    }
}
