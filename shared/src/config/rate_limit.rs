//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, ConfigError};

/// Where clock attempt counters are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Process-local map; correct only for a single instance
    #[default]
    Memory,
    /// Redis counters shared by every instance
    Redis,
}

impl std::str::FromStr for RateLimitBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "local" => Ok(RateLimitBackend::Memory),
            "redis" => Ok(RateLimitBackend::Redis),
            _ => Err(format!("Invalid rate limit backend: {}", s)),
        }
    }
}

/// Clock attempt rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Fixed window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Max attempts per (worker, location) per window
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How often expired in-memory entries are swept, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Counter storage backend
    #[serde(default)]
    pub backend: RateLimitBackend,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            max_attempts: default_max_attempts(),
            sweep_interval_seconds: default_sweep_interval(),
            backend: RateLimitBackend::default(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            window_seconds: env_parse("RCP_RATE_LIMIT_WINDOW_SECONDS", default_window_seconds())?,
            max_attempts: env_parse("RCP_RATE_LIMIT_MAX_ATTEMPTS", default_max_attempts())?,
            sweep_interval_seconds: env_parse(
                "RCP_RATE_LIMIT_SWEEP_SECONDS",
                default_sweep_interval(),
            )?,
            backend: env_parse("RCP_RATE_LIMIT_BACKEND", RateLimitBackend::default())?,
        })
    }
}

fn default_window_seconds() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sweep_interval() -> u64 {
    300 // 5 minutes
}
