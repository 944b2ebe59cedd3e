//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the RCP clock services
//! depend on.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations of the location directory, QR config
//!   store, clock event store and audit sink using SQLx
//! - **Cache**: Redis client used by the shared rate limiter
//! - **Services**: Redis-backed fixed-window rate limiter for deployments
//!   running more than one instance
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use rcp_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlAuditLogRepository, MySqlClockEventRepository, MySqlLocationRepository,
    MySqlQrConfigRepository,
};
pub use cache::RedisClient;
pub use services::RedisClockRateLimiter;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored data that does not map back onto a domain value
    #[error("Corrupt row: {0}")]
    Mapping(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }
}
