//! Configuration for the clock rate limiter

use rcp_shared::RateLimitConfig;

/// Window and attempt budget for clock attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Length of a counting window in seconds
    pub window_seconds: u64,
    /// Attempts allowed per window
    pub max_attempts: u32,
    /// How often the sweeper evicts elapsed windows (in seconds)
    pub sweep_interval_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            max_attempts: 3,
            sweep_interval_seconds: 300,
        }
    }
}

impl From<&RateLimitConfig> for RateLimiterConfig {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            window_seconds: config.window_seconds,
            max_attempts: config.max_attempts,
            sweep_interval_seconds: config.sweep_interval_seconds,
        }
    }
}
