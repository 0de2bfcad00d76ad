//! EzRoute CLI
//!
//! Looks up bus routes and checks the routing backend.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use application::{RouteListViewModel, RoutePort, RouteQuery};
use clap::Parser;
use domain::GeoLocation;
use infrastructure::{AppConfig, LoggingConfig, RouteAdapter, init_logging};
use presentation_cli::{Cli, Commands, log_filter_from_verbosity, render_json, render_text};
use tracing::{debug, info};

/// Exit status after Ctrl-C, as a shell reports SIGINT
const EXIT_INTERRUPTED: i32 = 130;

fn load_config(cli: &Cli, url: Option<String>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(url) = url {
        config.route.base_url = url;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

fn logging_for(cli: &Cli, config: &AppConfig) -> LoggingConfig {
    log_filter_from_verbosity(cli.verbose).map_or_else(
        || config.logging.clone(),
        |level| LoggingConfig {
            level: level.to_string(),
            ..config.logging.clone()
        },
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let url = match &cli.command {
        Commands::Route { url, .. } | Commands::Health { url } => url.clone(),
        Commands::Config => None,
    };
    let config = load_config(&cli, url)?;
    init_logging(&logging_for(&cli, &config))?;
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Route {
            origin_lat,
            origin_lng,
            dest_lat,
            dest_lng,
            json,
            ..
        } => {
            let origin = GeoLocation::new(origin_lat, origin_lng).context("invalid origin")?;
            let destination =
                GeoLocation::new(dest_lat, dest_lng).context("invalid destination")?;
            let port: Arc<dyn RoutePort> = Arc::new(RouteAdapter::from_config(&config.route)?);

            let view_model = RouteListViewModel::new();
            view_model.request(port, RouteQuery::new(origin, destination));

            let state = tokio::select! {
                state = view_model.settled() => state,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, cancelling route request");
                    view_model.teardown();
                    std::process::exit(EXIT_INTERRUPTED);
                },
            };

            let Some(state) = state else {
                anyhow::bail!("route request was cancelled");
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&render_json(&state))?);
            } else {
                println!("{}", render_text(&state));
            }

            if state.error_kind().is_some() {
                std::process::exit(1);
            }
        },

        Commands::Health { .. } => {
            let adapter = RouteAdapter::from_config(&config.route)?;
            if adapter.is_available().await {
                println!("✅ Healthy: {}", config.route.base_url);
            } else {
                println!("❌ Unreachable: {}", config.route.base_url);
                std::process::exit(1);
            }
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}
