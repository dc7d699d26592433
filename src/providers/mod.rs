//! Upstream map providers.
//!
//! # Data Flow
//! ```text
//! place name ──▶ geocoder.rs (Nominatim search) ──▶ Coordinate
//! Coordinate × 2 ──▶ router.rs (OSRM route) ──▶ RouteMetrics
//! ```
//!
//! # Design Decisions
//! - One pooled reqwest client per provider, built once at startup
//! - Every call carries a timeout from configuration
//! - No retries and no caching; a failed lookup is reported, not repeated

pub mod error;
pub mod geocoder;
pub mod router;
pub mod types;

pub use error::{GeocodeError, RoutingError};
pub use geocoder::NominatimGeocoder;
pub use router::OsrmRouter;
pub use types::{Coordinate, RouteMetrics};
