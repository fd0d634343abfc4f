//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::FixedOffset;
use std::net::SocketAddr;
use tracing::Level;

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
    pub database_url: String,
    pub log_level: Level,
    /// UTC offset whose calendar days the activity streak counts.
    pub day_offset: FixedOffset,
    pub cors_origin: String,
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
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let cors_origin =
            var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Storage ---
        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://mindmate.db?mode=rwc".to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
        }

        // --- Logging ---
        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Analytics ---
        let day_offset_str = var("DAY_OFFSET").unwrap_or_else(|| "+00:00".to_string());
        let day_offset = day_offset_str.parse::<FixedOffset>().map_err(|_| {
            ConfigError::InvalidValue(
                "DAY_OFFSET".to_string(),
                format!("'{}' is not a UTC offset like +05:30", day_offset_str),
            )
        })?;

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            day_offset,
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_bind_locally() {
        let config = Config::from_vars(lookup(&[])).unwrap();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_url, "sqlite://mindmate.db?mode=rwc");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.day_offset.local_minus_utc(), 0);
    }

    #[test]
    fn parses_day_offset() {
        let config = Config::from_vars(lookup(&[("DAY_OFFSET", "+05:30")])).unwrap();
        assert_eq!(config.day_offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_vars(lookup(&[("BIND_ADDRESS", "nowhere")])),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            Config::from_vars(lookup(&[("RUST_LOG", "chatty")])),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
        assert!(matches!(
            Config::from_vars(lookup(&[("DAY_OFFSET", "noon")])),
            Err(ConfigError::InvalidValue(var, _)) if var == "DAY_OFFSET"
        ));
        assert!(matches!(
            Config::from_vars(lookup(&[("DATABASE_URL", " ")])),
            Err(ConfigError::MissingVar(_))
        ));
    }
}
