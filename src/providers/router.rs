//! Driving distance and time from an OSRM-compatible route service.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;

use crate::config::RouterConfig;
use crate::observability::metrics;
use crate::providers::error::RoutingError;
use crate::providers::types::{Coordinate, RouteMetrics};

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

/// Routing client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct OsrmRouter {
    client: Client,
    endpoint: String,
    profile: String,
}

impl OsrmRouter {
    pub fn new(config: &RouterConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            profile: config.profile.clone(),
        })
    }

    /// Fastest driving route from `origin` to `destination`.
    pub async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RouteMetrics, RoutingError> {
        let start = Instant::now();
        let result = self.fetch(origin, destination).await;
        metrics::record_upstream("router", result.is_ok(), start);

        match &result {
            Ok(m) => tracing::info!(
                distance_km = m.distance_km,
                duration_minutes = m.duration_minutes,
                "Route calculated"
            ),
            Err(e) => tracing::warn!(error = %e, "Routing failed"),
        }
        result
    }

    /// `<endpoint>/<profile>/<lon>,<lat>;<lon>,<lat>`. OSRM takes longitude first.
    fn route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/{}/{},{};{},{}",
            self.endpoint,
            self.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }

    async fn fetch(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RouteMetrics, RoutingError> {
        let url = self.route_url(origin, destination);
        tracing::debug!(url = %url, "Calling router");

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // OSRM answers NoRoute/NoSegment with 400 and a JSON code
            if let Ok(body) = serde_json::from_str::<OsrmResponse>(&text) {
                if !body.code.is_empty() {
                    return Err(RoutingError::NoRoute(body.code));
                }
            }
            return Err(RoutingError::Status { status, body: text });
        }

        let body: OsrmResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(error = %e, body = %text, "Unparseable router body");
            e
        })?;

        let route = body
            .routes
            .first()
            .ok_or_else(|| RoutingError::NoRoute(body.code.clone()))?;

        RouteMetrics::from_meters_and_seconds(route.distance, route.duration).ok_or(
            RoutingError::InvalidMetrics {
                distance: route.distance,
                duration: route.duration,
            },
        )
    }
}
