//! Mock implementation of AuditLogRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::{AuditAction, AuditEntry};
use crate::errors::DomainError;
use crate::repositories::{lock, mock_failure};

use super::AuditLogRepository;

/// Mock implementation of AuditLogRepository for testing
#[derive(Clone, Default)]
pub struct MockAuditLogRepository {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *lock(&self.should_fail) = should_fail;
    }

    /// Get all stored entries for testing
    pub fn get_all_entries(&self) -> Vec<AuditEntry> {
        lock(&self.entries).clone()
    }

    /// Entries with the given action
    pub fn entries_with_action(&self, action: AuditAction) -> Vec<AuditEntry> {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.action == action)
            .cloned()
            .collect()
    }

    /// Denial reason codes recorded for an actor, oldest first
    pub fn denial_reasons_for(&self, actor_id: Uuid) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.actor_id == actor_id)
            .filter_map(|entry| entry.denial_reason().map(str::to_string))
            .collect()
    }

    /// Clear all entries
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        if *lock(&self.should_fail) {
            return Err(mock_failure());
        }

        lock(&self.entries).push(entry.clone());
        Ok(())
    }
}
