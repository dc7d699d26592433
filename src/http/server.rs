//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, body limit, panic guard)
//! - Bind server to listener and drain on shutdown

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::CommuteConfig;
use crate::history::SearchHistory;
use crate::http::error::handle_panic;
use crate::http::handlers::{get_routes, health};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::pricing::PricingEngine;
use crate::providers::{NominatimGeocoder, OsrmRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: NominatimGeocoder,
    pub router: OsrmRouter,
    pub pricing: Arc<PricingEngine>,
    pub history: SearchHistory,
    /// Deadline for one whole search, provider calls included.
    pub request_timeout: Duration,
}

/// HTTP server for the commute API.
pub struct HttpServer {
    router: Router,
    config: CommuteConfig,
}

impl HttpServer {
    /// Create a new HTTP server around already-built dependencies.
    pub fn new(config: CommuteConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The body limit and the request deadline are enforced inside the
    /// handler's error path so both answer with the JSON error body.
    fn build_router(config: &CommuteConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/get-routes", post(get_routes))
            .route("/health", get(health))
            .with_state(state)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(CorsLayer::permissive())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &CommuteConfig {
        &self.config
    }
}
