//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the commute service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CommuteConfig {
    /// Listener configuration (host and port).
    pub listener: ListenerConfig,

    /// Geocoding provider settings.
    pub geocoder: GeocoderConfig,

    /// Routing provider settings.
    pub router: RouterConfig,

    /// Search history storage.
    pub storage: StorageConfig,

    /// Fare and duration tariff.
    pub pricing: PricingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Geocoding provider (Nominatim search API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Search endpoint URL.
    pub endpoint: String,

    /// Client identity sent as `User-Agent`. Nominatim rejects anonymous traffic.
    pub user_agent: String,

    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "CityCommuteApp_Project/1.0".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Routing provider (OSRM route service).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Route service base URL, without the profile segment.
    pub endpoint: String,

    /// OSRM profile segment.
    pub profile: String,

    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://router.project-osrm.org/route/v1".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Search history storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file, created on first start.
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "commute.db".to_string(),
        }
    }
}

/// Tariff used by the pricing engine.
///
/// Bus fare is `bus_base_fare + km * bus_fare_per_km`, cab fare is
/// `cab_base_fare + km * cab_fare_per_km`, both floored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Symbol prefixed to every cost.
    pub currency_symbol: String,

    pub bus_base_fare: f64,
    pub bus_fare_per_km: f64,

    /// Walk plus wait minutes added on top of the driving time.
    pub bus_overhead_mins: u32,

    /// Walk to the stop, shown as its own step.
    pub walk_to_stop_mins: u32,

    /// Subtracted from the bus total to get the in-vehicle leg.
    pub bus_leg_offset_mins: u32,

    pub cab_base_fare: f64,
    pub cab_fare_per_km: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            bus_base_fare: 10.0,
            bus_fare_per_km: 2.0,
            bus_overhead_mins: 20,
            walk_to_stop_mins: 5,
            bus_leg_offset_mins: 10,
            cab_base_fare: 40.0,
            cab_fare_per_km: 12.0,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 16 * 1024, // 16KB, two place names
        }
    }
}
