//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (parsing handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api token must not be empty")]
    EmptyApiToken,

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("public url '{0}' must start with http:// or https://")]
    InvalidPublicUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.api_token.trim().is_empty() {
        errors.push(ValidationError::EmptyApiToken);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "bind address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if !(config.public_url.starts_with("http://") || config.public_url.starts_with("https://")) {
        errors.push(ValidationError::InvalidPublicUrl(config.public_url.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("request timeout"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("max body size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
