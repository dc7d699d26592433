//! Commute options API (v1)
//!
//! Given two place names, returns a cheap bus option and a fast cab option
//! between them.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /api/get-routes
//!     ─────────────────────────▶ ┌──────────────┐
//!                                │ http handler │
//!                                └──────┬───────┘
//!                  ┌────────────────────┼─────────────────────┐
//!                  ▼                    ▼                     ▼
//!          ┌──────────────┐     ┌──────────────┐      ┌──────────────┐
//!          │  geocoder ×2 │ ──▶ │    router    │ ──▶  │   pricing    │
//!          │  (Nominatim) │     │    (OSRM)    │      │   engine     │
//!          └──────────────┘     └──────────────┘      └──────┬───────┘
//!                                       │                     │
//!                                       ▼ (background)        ▼
//!                               ┌──────────────┐       { routes: [..] }
//!                               │search history│
//!                               │   (SQLite)   │
//!                               └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use commute_api::config::resolve_config;
use commute_api::http::HttpServer;
use commute_api::lifecycle::{build_state, signals, Shutdown};
use commute_api::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(version, about = "Commute options API server", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "COMMUTE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("commute-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let state = build_state(&config)?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Server running"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::forward_signals(&shutdown);

    let history = state.history.clone();
    let server = HttpServer::new(config, state);
    server.run(listener, server_shutdown).await?;

    history.flush().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
