//! Infrastructure layer - Adapters for external systems
//!
//! Implements the route port over the EzRoute HTTP client and provides
//! configuration loading and logging setup for the binaries.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::*;
pub use config::{AppConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX, LOG_LEVELS, LoggingConfig};
pub use logging::{LoggingError, init_logging};
