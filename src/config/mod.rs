//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → loader.rs (environment overrides, e.g. PORT)
//!     → CommuteConfig (validated, immutable)
//!     → sections handed to the subsystems that own them
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::CommuteConfig;
pub use validation::{provider_budget_secs, validate_config, ValidationError};
pub use schema::{
    GeocoderConfig, ListenerConfig, ObservabilityConfig, PricingConfig, RouterConfig,
    SecurityConfig, StorageConfig, TimeoutConfig,
};
