use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::request::RouteQuery;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pricing::RoutesResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/get-routes`
pub async fn get_routes(
    State(state): State<AppState>,
    payload: Result<Json<RouteQuery>, JsonRejection>,
) -> Response {
    let start = Instant::now();

    let result = match payload {
        Ok(Json(query)) => {
            match tokio::time::timeout(state.request_timeout, plan_routes(&state, query)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = state.request_timeout.as_secs(),
                        "Search exceeded request deadline"
                    );
                    Err(ApiError::Internal)
                }
            }
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                Err(ApiError::PayloadTooLarge)
            } else {
                Err(ApiError::InvalidInput)
            }
        }
    };

    let response = match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request("get_routes", response.status().as_u16(), start);
    response
}

/// Geocode both ends, route between them, log the search and price it.
async fn plan_routes(state: &AppState, query: RouteQuery) -> Result<RoutesResponse, ApiError> {
    let (from_loc, to_loc) = query.into_places()?;

    // The lookups are independent; running them together only changes latency.
    let (origin, destination) = tokio::join!(
        state.geocoder.resolve(&from_loc),
        state.geocoder.resolve(&to_loc),
    );
    let origin = origin?;
    let destination = destination?;

    let route = state.router.route(&origin, &destination).await?;

    tracing::info!(
        from = %from_loc,
        to = %to_loc,
        distance_km = route.distance_km,
        duration_minutes = route.duration_minutes,
        "Pricing commute"
    );

    // Detached: the response never waits on, or reflects, the write.
    state.history.record(from_loc, to_loc);

    Ok(RoutesResponse {
        routes: state.pricing.price(&route).into(),
    })
}
