//! Shared utilities and common types for the RCP server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error envelope returned by the API
//! - Pure utilities (geodesic distance for geofence checks)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, DatabaseConfig, Environment, LoggingConfig,
    RateLimitBackend, RateLimitConfig, RcpConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::geo;
