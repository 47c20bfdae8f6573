//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0)
//! - Validate addresses and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("database.url or database.seed_path must be set")]
    NoDataSource,

    #[error("database.max_connections must be greater than zero")]
    PoolSize,

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("site.base_url '{0}' is not an absolute http(s) URL")]
    BaseUrl(String),

    #[error("sheets.endpoint '{0}' is not an absolute http(s) URL")]
    SheetsEndpoint(String),

    #[error("admin.api_key must be set when the admin API is enabled")]
    AdminKey,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.database.url.is_none() && config.database.seed_path.is_none() {
        errors.push(ValidationError::NoDataSource);
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::PoolSize);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if !is_http_url(&config.site.base_url) {
        errors.push(ValidationError::BaseUrl(config.site.base_url.clone()));
    }
    if let Some(endpoint) = &config.sheets.endpoint {
        if !is_http_url(endpoint) {
            errors.push(ValidationError::SheetsEndpoint(endpoint.clone()));
        }
    }
    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::AdminKey);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
