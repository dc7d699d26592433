//! Values produced by the upstream providers.

use serde::{Deserialize, Serialize};

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Decimal degrees, WGS84.
    pub latitude: f64,
    /// Decimal degrees, WGS84.
    pub longitude: f64,
    /// Provider's full name for the match.
    pub display_name: String,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside WGS84 bounds.
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Option<Self> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        in_range.then(|| Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        })
    }
}

/// Driving distance and time between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Kilometers, rounded to one fractional digit.
    pub distance_km: f64,
    /// Minutes, rounded to the nearest whole minute.
    pub duration_minutes: u32,
}

impl RouteMetrics {
    /// Convert raw provider units. Returns `None` for negative or non-finite input.
    pub fn from_meters_and_seconds(meters: f64, seconds: f64) -> Option<Self> {
        if !meters.is_finite() || !seconds.is_finite() || meters < 0.0 || seconds < 0.0 {
            return None;
        }
        let minutes = (seconds / 60.0).round();
        if minutes > u32::MAX as f64 {
            return None;
        }
        Some(Self {
            distance_km: (meters / 100.0).round() / 10.0,
            duration_minutes: minutes as u32,
        })
    }
}
