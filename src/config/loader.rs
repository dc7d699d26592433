//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::CommuteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.port`.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Environment error: {}={:?} is not a valid port", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CommuteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CommuteConfig, ConfigError> {
    let config: CommuteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration at startup.
///
/// Reads `path` when given, falls back to defaults otherwise, then applies
/// process environment overrides.
pub fn resolve_config(path: Option<&Path>) -> Result<CommuteConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => CommuteConfig::default(),
    };
    apply_env_overrides(config, |var| std::env::var(var).ok())
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: CommuteConfig, lookup: F) -> Result<CommuteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PORT_ENV) {
        config.listener.port = value.trim().parse().map_err(|_| ConfigError::Env {
            var: PORT_ENV,
            value,
        })?;
    }
    Ok(config)
}
