//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub mongo_url: String,
    /// `EnvFilter` directives, e.g. `info,tower_http=debug`.
    pub log_filter: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let mongo_url =
            lookup("MONGO_URL").unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        if mongo_url.trim().is_empty() {
            return Err(ConfigError::MissingVar("MONGO_URL".to_string()));
        }

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(&log_filter).map_err(|e| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid filter: {}", log_filter, e),
            )
        })?;

        Ok(Self {
            bind_address,
            mongo_url,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.mongo_url, "mongodb://localhost:27017");
        assert_eq!(config.bind_address.port(), 8000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("MONGO_URL", "mongodb://db:27017"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("RUST_LOG", "info,tower_http=debug"),
        ])
        .unwrap();
        assert_eq!(config.mongo_url, "mongodb://db:27017");
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_filter, "info,tower_http=debug");
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        let err = config_from(&[("BIND_ADDRESS", "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "BIND_ADDRESS"));
    }

    #[test]
    fn invalid_log_filter_is_rejected() {
        let err = config_from(&[("RUST_LOG", "tower_http=chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn blank_mongo_url_is_missing() {
        let err = config_from(&[("MONGO_URL", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "MONGO_URL"));
    }
}
