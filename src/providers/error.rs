use reqwest::StatusCode;
use thiserror::Error;

/// Why a place name could not be turned into a coordinate.
///
/// The HTTP layer reports every variant as "not found"; the variants exist
/// so the logs say which one happened.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Place name is empty")]
    EmptyQuery,

    #[error("No geocoding match for \"{0}\"")]
    NoMatch(String),

    #[error("Geocoder returned status {0}")]
    Status(StatusCode),

    #[error("Geocoder returned an unusable coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why no driving path could be produced between two coordinates.
///
/// Reported as "unavailable" at the HTTP boundary.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("No route found (provider code: {0})")]
    NoRoute(String),

    #[error("Router returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Router returned unusable metrics: distance={distance}, duration={duration}")]
    InvalidMetrics { distance: f64, duration: f64 },

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}
