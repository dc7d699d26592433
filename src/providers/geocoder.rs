//! Place-name lookup against a Nominatim-compatible search API.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;

use crate::config::GeocoderConfig;
use crate::observability::metrics;
use crate::providers::error::GeocodeError;
use crate::providers::types::Coordinate;

/// One entry of a Nominatim `format=json` search response.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Degrees,
    lon: Degrees,
    #[serde(default)]
    display_name: String,
}

/// Nominatim sends degrees as strings; some compatible servers send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Text(s) => s.trim().parse().ok(),
            Degrees::Number(n) => Some(*n),
        }
    }
}

/// Geocoding client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Resolve `name` to its best match.
    pub async fn resolve(&self, name: &str) -> Result<Coordinate, GeocodeError> {
        let start = Instant::now();
        let result = self.lookup(name).await;
        metrics::record_upstream("geocoder", result.is_ok(), start);

        match &result {
            Ok(coord) => tracing::info!(
                query = %name,
                lat = coord.latitude,
                lon = coord.longitude,
                "Geocoded place"
            ),
            Err(GeocodeError::NoMatch(_)) => tracing::info!(query = %name, "No geocoding match"),
            Err(e) => tracing::warn!(query = %name, error = %e, "Geocoding failed"),
        }
        result
    }

    async fn lookup(&self, name: &str) -> Result<Coordinate, GeocodeError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        tracing::debug!(query = %query, endpoint = %self.endpoint, "Calling geocoder");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let text = response.text().await?;
        let places: Vec<NominatimPlace> = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(error = %e, body = %text, "Unparseable geocoder body");
            e
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

        let (lat, lon) = match (place.lat.value(), place.lon.value()) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(GeocodeError::InvalidCoordinate(format!(
                    "{:?},{:?}",
                    place.lat, place.lon
                )))
            }
        };

        Coordinate::new(lat, lon, place.display_name)
            .ok_or_else(|| GeocodeError::InvalidCoordinate(format!("{},{}", lat, lon)))
    }
}
