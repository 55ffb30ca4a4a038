//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::{Environment, ServiceConfig, DEFAULT_PORT};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
///
/// A `.env` file in the working directory is read first; variables already
/// present in the environment take precedence over it. Runs before logging
/// is initialised, so it does not log.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    dotenv::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

/// Build configuration from an arbitrary key lookup.
pub fn load_from<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = ServiceConfig::default();

    if let Some(env) = get("APP_ENV").or_else(|| get("NODE_ENV")) {
        config.environment = env
            .parse::<Environment>()
            .map_err(|reason| ConfigError::Invalid { key: "APP_ENV", reason })?;
    }

    config.auth.api_token = get("API_TOKEN").ok_or(ConfigError::Missing("API_TOKEN"))?;

    if let Some(addr) = get("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    } else if let Some(port) = get("PORT") {
        let port: u16 = parse(&port, "PORT")?;
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    config.public_url = get("PUBLIC_URL")
        .unwrap_or_else(|| format!("http://localhost:{}", DEFAULT_PORT))
        .trim_end_matches('/')
        .to_string();

    if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
        config.timeouts.request_secs = parse(&secs, "REQUEST_TIMEOUT_SECS")?;
    }
    if let Some(limit) = get("MAX_BODY_SIZE") {
        config.security.max_body_size = parse(&limit, "MAX_BODY_SIZE")?;
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(enabled) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse(&enabled, "METRICS_ENABLED")?;
    }
    if let Some(addr) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = addr;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse<T>(raw: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
