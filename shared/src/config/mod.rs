//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis configuration (shared rate limiter backend)
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Clock attempt rate limiting
//! - `rcp` - QR token signing and clock-in policy
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod rcp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitBackend, RateLimitConfig};
pub use rcp::{RcpConfig, MIN_SECRET_LEN};
pub use server::ServerConfig;

/// Errors raised while loading configuration at startup
///
/// Any of these aborts startup; there are no silent fallbacks for
/// security-relevant settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {key}")]
    MissingSecret { key: String },

    #[error("Setting {key} is too short (minimum {min_len} bytes)")]
    WeakSecret { key: String, min_len: usize },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// QR token and clock policy configuration
    pub rcp: RcpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Reads a `.env` file first when one is present. Fails when the QR
    /// signing secret is absent or when a numeric setting cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            cache: CacheConfig::from_env(),
            rcp: RcpConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
