//! QR configuration store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::QrConfig;
use crate::errors::DomainError;

#[async_trait]
pub trait QrConfigRepository: Send + Sync {
    /// Fetch the location's QR config, creating it with `default_ttl_seconds`
    /// and static rotation on first use
    ///
    /// Concurrent first calls for the same location must converge on a
    /// single stored config.
    async fn get_or_create(
        &self,
        location_id: Uuid,
        default_ttl_seconds: i64,
    ) -> Result<QrConfig, DomainError>;
}
