//! MySQL implementation of the location directory.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rcp_core::domain::entities::Location;
use rcp_core::errors::DomainError;
use rcp_core::repositories::LocationRepository;

use super::{column, db_err, uuid_column};

/// Reads locations from the organization's `locations` table
pub struct MySqlLocationRepository {
    pool: MySqlPool,
}

impl MySqlLocationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_location(row: &MySqlRow) -> Result<Location, DomainError> {
        Ok(Location {
            id: uuid_column(row, "id")?,
            organization_id: uuid_column(row, "organization_id")?,
            name: column(row, "name")?,
            latitude: column(row, "latitude")?,
            longitude: column(row, "longitude")?,
            radius_meters: column(row, "radius_meters")?,
            max_accuracy_meters: column(row, "max_accuracy_meters")?,
            rcp_enabled: column(row, "rcp_enabled")?,
        })
    }
}

#[async_trait]
impl LocationRepository for MySqlLocationRepository {
    async fn find_by_id_and_org(
        &self,
        location_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Location>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, organization_id, name, latitude, longitude, radius_meters,
                   max_accuracy_meters, rcp_enabled
            FROM locations
            WHERE id = ? AND organization_id = ?
            "#,
        )
        .bind(location_id.to_string())
        .bind(organization_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_location).transpose()
    }
}
