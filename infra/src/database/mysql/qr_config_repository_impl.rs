//! MySQL implementation of the QR config store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rcp_core::domain::entities::{QrConfig, RotationMode};
use rcp_core::errors::DomainError;
use rcp_core::repositories::QrConfigRepository;

use super::{column, db_err, uuid_column};

pub struct MySqlQrConfigRepository {
    pool: MySqlPool,
}

impl MySqlQrConfigRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_config(row: &MySqlRow) -> Result<QrConfig, DomainError> {
        let mode: String = column(row, "rotation_mode")?;
        let rotation_mode = RotationMode::parse(&mode).ok_or_else(|| DomainError::Storage {
            message: format!("Unknown rotation mode: {}", mode),
        })?;
        let ttl: i32 = column(row, "token_ttl_seconds")?;

        Ok(QrConfig {
            id: uuid_column(row, "id")?,
            location_id: uuid_column(row, "location_id")?,
            token_ttl_seconds: i64::from(ttl),
            rotation_mode,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl QrConfigRepository for MySqlQrConfigRepository {
    async fn get_or_create(
        &self,
        location_id: Uuid,
        default_ttl_seconds: i64,
    ) -> Result<QrConfig, DomainError> {
        let ttl = i32::try_from(default_ttl_seconds).map_err(|_| DomainError::Validation {
            message: format!("Token TTL {} is out of range", default_ttl_seconds),
        })?;

        // The unique key on location_id makes concurrent first requests converge
        sqlx::query(
            r#"
            INSERT IGNORE INTO rcp_qr_configs
                (id, location_id, token_ttl_seconds, rotation_mode, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(location_id.to_string())
        .bind(ttl)
        .bind(RotationMode::Static.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let row = sqlx::query(
            r#"
            SELECT id, location_id, token_ttl_seconds, rotation_mode, created_at
            FROM rcp_qr_configs
            WHERE location_id = ?
            "#,
        )
        .bind(location_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Self::row_to_config(&row)
    }
}
