//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate provider endpoints parse as absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, tariff non-negative)
//! - Validate the request deadline outlasts the provider timeouts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CommuteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::CommuteConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `geocoder.endpoint`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &CommuteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_endpoint(&mut errors, "geocoder.endpoint", &config.geocoder.endpoint);
    check_endpoint(&mut errors, "router.endpoint", &config.router.endpoint);

    if config.geocoder.user_agent.trim().is_empty() {
        errors.push(ValidationError::new(
            "geocoder.user_agent",
            "must identify the client",
        ));
    }
    if config.router.profile.trim().is_empty() || config.router.profile.contains('/') {
        errors.push(ValidationError::new(
            "router.profile",
            "must be a single path segment",
        ));
    }

    if config.geocoder.timeout_secs == 0 {
        errors.push(ValidationError::new("geocoder.timeout_secs", "must be > 0"));
    }
    if config.router.timeout_secs == 0 {
        errors.push(ValidationError::new("router.timeout_secs", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    } else if config.timeouts.request_secs <= provider_budget_secs(config) {
        // Both lookups run at once, then the route call.
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed geocoder.timeout_secs + router.timeout_secs ({}s)",
                provider_budget_secs(config)
            ),
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ValidationError::new("storage.database_path", "must not be empty"));
    }

    let tariff = &config.pricing;
    for (field, value) in [
        ("pricing.bus_base_fare", tariff.bus_base_fare),
        ("pricing.bus_fare_per_km", tariff.bus_fare_per_km),
        ("pricing.cab_base_fare", tariff.cab_base_fare),
        ("pricing.cab_fare_per_km", tariff.cab_fare_per_km),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(field, "must be a non-negative number"));
        }
    }
    if tariff.bus_leg_offset_mins > tariff.bus_overhead_mins {
        errors.push(ValidationError::new(
            "pricing.bus_leg_offset_mins",
            "must not exceed pricing.bus_overhead_mins",
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Worst-case time spent waiting on providers for one search.
pub fn provider_budget_secs(config: &CommuteConfig) -> u64 {
    config
        .geocoder
        .timeout_secs
        .saturating_add(config.router.timeout_secs)
}

fn check_endpoint(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
