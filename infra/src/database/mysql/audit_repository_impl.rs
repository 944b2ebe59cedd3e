//! MySQL implementation of the audit sink.
//!
//! Entries are written to `rcp_audit_log` and never updated; querying them is
//! left to the reporting side of the platform.

use async_trait::async_trait;
use sqlx::MySqlPool;

use rcp_core::domain::entities::AuditEntry;
use rcp_core::errors::DomainError;
use rcp_core::repositories::AuditLogRepository;

use super::db_err;

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    /// Create a new MySQL audit log repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn create(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO rcp_audit_log (
                id, actor_id, organization_id, action, entity_type, entity_id,
                before_state, after_state, ip_address, user_agent, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.actor_id.to_string())
        .bind(entry.organization_id.to_string())
        .bind(entry.action.as_str())
        .bind(&entry.entity_type)
        .bind(entry.entity_id.map(|id| id.to_string()))
        .bind(&entry.before)
        .bind(&entry.after)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
