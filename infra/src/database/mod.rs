//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and embedded migrations
//! - Repository implementations for the clock collaborators

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{
    MySqlAuditLogRepository, MySqlClockEventRepository, MySqlLocationRepository,
    MySqlQrConfigRepository,
};
