//! Audit sink trait defining the interface for audit entry persistence.

use async_trait::async_trait;

use crate::domain::entities::AuditEntry;
use crate::errors::DomainError;

/// External sink receiving an entry for every QR issuance and clock attempt
///
/// Implementations should keep writes cheap; callers treat failures as
/// non-fatal and only log them.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist a new audit entry
    ///
    /// # Returns
    /// * `Ok(())` on successful creation
    /// * `Err(DomainError)` if the sink is unavailable
    async fn create(&self, entry: &AuditEntry) -> Result<(), DomainError>;
}
