//! Mock implementation of QrConfigRepository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::QrConfig;
use crate::errors::DomainError;
use crate::repositories::{lock, mock_failure};

use super::QrConfigRepository;

#[derive(Clone, Default)]
pub struct MockQrConfigRepository {
    configs: Arc<Mutex<HashMap<Uuid, QrConfig>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockQrConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-configure a location
    pub fn insert(&self, config: QrConfig) {
        lock(&self.configs).insert(config.location_id, config);
    }

    pub fn get(&self, location_id: Uuid) -> Option<QrConfig> {
        lock(&self.configs).get(&location_id).cloned()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *lock(&self.should_fail) = should_fail;
    }
}

#[async_trait]
impl QrConfigRepository for MockQrConfigRepository {
    async fn get_or_create(
        &self,
        location_id: Uuid,
        default_ttl_seconds: i64,
    ) -> Result<QrConfig, DomainError> {
        if *lock(&self.should_fail) {
            return Err(mock_failure());
        }

        Ok(lock(&self.configs)
            .entry(location_id)
            .or_insert_with(|| QrConfig::with_ttl(location_id, default_ttl_seconds))
            .clone())
    }
}
