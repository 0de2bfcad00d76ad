//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// EzRoute CLI
#[derive(Debug, Parser)]
#[command(name = "ezroute-cli")]
#[command(author, version, about = "Bus routes across Singapore from the command line", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./ezroute.toml if present)
    #[arg(short, long, global = true, env = "EZROUTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find a bus route between two points
    ///
    /// Example: ezroute-cli route --origin-lat 1.307873 --origin-lng 103.772014
    ///          --dest-lat 1.360216 --dest-lng 103.989691
    Route {
        /// Origin latitude
        #[arg(long, allow_hyphen_values = true)]
        origin_lat: f64,

        /// Origin longitude
        #[arg(long, allow_hyphen_values = true)]
        origin_lng: f64,

        /// Destination latitude
        #[arg(long, allow_hyphen_values = true)]
        dest_lat: f64,

        /// Destination longitude
        #[arg(long, allow_hyphen_values = true)]
        dest_lng: f64,

        /// Routing backend base URL (overrides configuration)
        #[arg(short, long)]
        url: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the routing backend is reachable
    Health {
        /// Routing backend base URL (overrides configuration)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Determine log filter level from verbosity count
///
/// Returns `None` when no `-v` was given so the configured level applies.
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(200), Some("trace"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
