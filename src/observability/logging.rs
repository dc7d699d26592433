//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Let `RUST_LOG` override the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Fallback filter quiets dependencies below the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before anything logs.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(format!("commute_api={level},tower_http={level}", level = log_level))
}
