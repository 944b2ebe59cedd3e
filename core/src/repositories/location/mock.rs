//! Mock implementation of LocationRepository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::Location;
use crate::errors::DomainError;
use crate::repositories::{lock, mock_failure};

use super::LocationRepository;

/// In-memory location directory
#[derive(Clone, Default)]
pub struct MockLocationRepository {
    locations: Arc<Mutex<HashMap<Uuid, Location>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the directory with a location
    pub fn insert(&self, location: Location) {
        lock(&self.locations).insert(location.id, location);
    }

    /// Set whether lookups should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *lock(&self.should_fail) = should_fail;
    }
}

#[async_trait]
impl LocationRepository for MockLocationRepository {
    async fn find_by_id_and_org(
        &self,
        location_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Location>, DomainError> {
        if *lock(&self.should_fail) {
            return Err(mock_failure());
        }

        Ok(lock(&self.locations)
            .get(&location_id)
            .filter(|location| location.organization_id == organization_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_scoped_to_organization() {
        let repo = MockLocationRepository::new();
        let org = Uuid::new_v4();
        let location = Location::new(org, "Warehouse");
        let id = location.id;
        repo.insert(location);

        assert!(repo.find_by_id_and_org(id, org).await.unwrap().is_some());
        assert!(repo
            .find_by_id_and_org(id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_id_and_org(Uuid::new_v4(), org)
            .await
            .unwrap()
            .is_none());
    }
}
