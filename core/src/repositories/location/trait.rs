//! Location directory trait. Locations are owned by the organization and
//! read-only to the clock subsystem.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Location;
use crate::errors::DomainError;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Find a location scoped to its organization
    ///
    /// Returns `Ok(None)` when the location does not exist or belongs to a
    /// different organization.
    async fn find_by_id_and_org(
        &self,
        location_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Location>, DomainError>;
}
