//! Route client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::retry::RetryPolicy;

/// Configuration for the EzRoute routing backend client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EzRouteConfig {
    /// Base URL of the routing backend
    #[serde(default = "default_base_url", alias = "baseUrl")]
    pub base_url: String,

    /// Timeout, retry count, and backoff for each lookup
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Reject coordinates outside the area the backend serves
    #[serde(default = "default_true", alias = "restrictToServiceArea")]
    pub restrict_to_service_area: bool,
}

fn default_base_url() -> String {
    "https://ezroute.janskyd.com".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for EzRouteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            retry: RetryPolicy::default(),
            restrict_to_service_area: true,
        }
    }
}

impl EzRouteConfig {
    /// Create a configuration pointing at `base_url` with short timeouts and
    /// no jitter, suitable for tests
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry: RetryPolicy::new(1000, 2, 2.0)
                .with_retry_delay_ms(10)
                .without_jitter(),
            restrict_to_service_area: true,
        }
    }

    /// The `/findroute` endpoint under the base URL
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the base URL cannot be parsed.
    pub fn findroute_url(&self) -> Result<Url, String> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/findroute")).map_err(|e| format!("invalid base_url: {e}"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url).map_err(|e| format!("invalid base_url: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        self.retry.validate()
    }
}
