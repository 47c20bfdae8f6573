//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

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
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read the TOML file at `path`, or defaults when the file does not exist.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(ServiceConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Overlay values from the environment. `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = Some(url);
    }
    if let Some(endpoint) = lookup("SHEETS_ENDPOINT") {
        config.sheets.endpoint = Some(endpoint);
    }
    if let Some(token) = lookup("SHEETS_TOKEN") {
        config.sheets.token = Some(token);
    }
    if let Some(key) = lookup("ADMIN_API_KEY") {
        config.admin.api_key = key;
    }
    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
}

/// Load, overlay the process environment, and validate.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let mut config = read_config(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
