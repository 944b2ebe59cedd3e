//! MySQL repository implementations
//!
//! UUIDs are stored as `CHAR(36)` and timestamps as `DATETIME(6)` in UTC.

mod audit_repository_impl;
mod clock_event_repository_impl;
mod location_repository_impl;
mod qr_config_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use clock_event_repository_impl::MySqlClockEventRepository;
pub use location_repository_impl::MySqlLocationRepository;
pub use qr_config_repository_impl::MySqlQrConfigRepository;

use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use rcp_core::errors::DomainError;

use crate::InfrastructureError;

pub(crate) fn db_err(e: sqlx::Error) -> DomainError {
    InfrastructureError::Database(e).into()
}

fn mapping_err(message: String) -> DomainError {
    InfrastructureError::Mapping(message).into()
}

/// Read a column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| mapping_err(format!("Failed to get {}: {}", name, e)))
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| mapping_err(format!("Invalid UUID in {}: {}", name, e)))
}
