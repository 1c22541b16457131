//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Enables mock mode when set to `true` (case-insensitive).
pub const ENV_USE_MOCKS: &str = "RELAY_USE_MOCKS";
/// Overrides `upstream.base_url`.
pub const ENV_API_URL: &str = "RELAY_API_URL";
/// Overrides `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "RELAY_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document without validating it.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply `RELAY_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_USE_MOCKS) {
        config.use_mocks = value.trim().eq_ignore_ascii_case("true");
    }
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.upstream.base_url = url.trim().to_string();
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS).filter(|v| !v.trim().is_empty()) {
        config.listener.bind_address = addr.trim().to_string();
    }
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
