//! Clock event store trait.
//!
//! Events are append-only. Alternation is enforced through
//! [`ClockEventRepository::append_if_latest`], which only writes when the
//! latest event for the `(worker, location)` pair is still the one the caller
//! validated against.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ClockEvent;
use crate::errors::DomainError;

/// Result of a conditional append
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// The event was stored
    Appended(ClockEvent),
    /// Another event was recorded for the pair since it was read; nothing was stored
    Conflict,
}

#[async_trait]
pub trait ClockEventRepository: Send + Sync {
    /// Latest event for a worker at a location
    async fn most_recent(
        &self,
        worker_id: Uuid,
        location_id: Uuid,
    ) -> Result<Option<ClockEvent>, DomainError>;

    /// Latest event for a worker within an organization, optionally scoped to
    /// one location
    async fn most_recent_in_org(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
    ) -> Result<Option<ClockEvent>, DomainError>;

    /// Store `event` only if the latest event for its `(worker, location)` is
    /// `expected_previous` (`None` meaning no event has been recorded yet)
    ///
    /// The check and the write happen atomically.
    async fn append_if_latest(
        &self,
        event: &ClockEvent,
        expected_previous: Option<Uuid>,
    ) -> Result<AppendOutcome, DomainError>;

    /// Events for a worker, newest first
    async fn history(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
        limit: usize,
    ) -> Result<Vec<ClockEvent>, DomainError>;
}
