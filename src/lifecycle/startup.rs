//! Startup orchestration.
//!
//! # Responsibilities
//! - Build provider clients and open the search history
//! - Assemble the handler state from a validated configuration
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::CommuteConfig;
use crate::history::{HistoryError, SearchHistory};
use crate::http::server::AppState;
use crate::pricing::PricingEngine;
use crate::providers::{NominatimGeocoder, OsrmRouter};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to open search history: {0}")]
    History(#[from] HistoryError),
}

/// Construct every dependency the handlers need.
pub fn build_state(config: &CommuteConfig) -> Result<AppState, StartupError> {
    let geocoder = NominatimGeocoder::new(&config.geocoder)?;
    let router = OsrmRouter::new(&config.router)?;
    let history = SearchHistory::open(&config.storage.database_path)?;

    tracing::info!(
        geocoder = %config.geocoder.endpoint,
        router = %config.router.endpoint,
        database = %config.storage.database_path,
        "Dependencies initialized"
    );

    Ok(AppState {
        geocoder,
        router,
        pricing: Arc::new(PricingEngine::new(config.pricing.clone())),
        history,
        request_timeout: Duration::from_secs(config.timeouts.request_secs),
    })
}
