//! Application configuration
//!
//! Split into focused sections:
//! - `route`: routing backend, timeouts, and retries ([`EzRouteConfig`])
//! - `logging`: log level and output format
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `EZROUTE_`-prefixed environment variables using `__` between nested keys
//! (e.g. `EZROUTE_ROUTE__RETRY__TIMEOUT_MS=4000`).

mod logging;

use std::path::Path;

use integration_ezroute::EzRouteConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use logging::{LOG_LEVELS, LoggingConfig};

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ezroute.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "EZROUTE";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing backend configuration
    #[serde(default)]
    pub route: EzRouteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `ezroute.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required to exist) or the
    /// default file, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, None)
    }

    fn build(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(base_url = %app.route.base_url, "Configuration loaded");
        Ok(app)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.route.validate().map_err(|e| format!("route: {e}"))?;
        self.logging.validate().map_err(|e| format!("logging: {e}"))
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
