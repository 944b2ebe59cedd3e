//! Mock implementation of ClockEventRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::ClockEvent;
use crate::errors::DomainError;
use crate::repositories::{lock, mock_failure};

use super::{AppendOutcome, ClockEventRepository};

/// In-memory event store; events are kept in append order
#[derive(Clone, Default)]
pub struct MockClockEventRepository {
    events: Arc<Mutex<Vec<ClockEvent>>>,
    /// Events written "by another request" right before the next appends
    racing_writes: Arc<Mutex<Vec<ClockEvent>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockClockEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event directly, bypassing the conditional check
    pub fn insert(&self, event: ClockEvent) {
        lock(&self.events).push(event);
    }

    /// Simulate a concurrent writer: `event` lands just before the next
    /// conditional append is evaluated
    pub fn race_next_append_with(&self, event: ClockEvent) {
        lock(&self.racing_writes).push(event);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *lock(&self.should_fail) = should_fail;
    }

    pub fn get_all_events(&self) -> Vec<ClockEvent> {
        lock(&self.events).clone()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *lock(&self.should_fail) {
            return Err(mock_failure());
        }
        Ok(())
    }
}

fn latest_matching<F>(events: &[ClockEvent], predicate: F) -> Option<ClockEvent>
where
    F: Fn(&ClockEvent) -> bool,
{
    events.iter().rev().find(|event| predicate(event)).cloned()
}

#[async_trait]
impl ClockEventRepository for MockClockEventRepository {
    async fn most_recent(
        &self,
        worker_id: Uuid,
        location_id: Uuid,
    ) -> Result<Option<ClockEvent>, DomainError> {
        self.check_failure()?;
        let events = lock(&self.events);
        Ok(latest_matching(&events, |event| {
            event.worker_id == worker_id && event.location_id == location_id
        }))
    }

    async fn most_recent_in_org(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
    ) -> Result<Option<ClockEvent>, DomainError> {
        self.check_failure()?;
        let events = lock(&self.events);
        Ok(latest_matching(&events, |event| {
            event.worker_id == worker_id
                && event.organization_id == organization_id
                && location_id.map_or(true, |id| event.location_id == id)
        }))
    }

    async fn append_if_latest(
        &self,
        event: &ClockEvent,
        expected_previous: Option<Uuid>,
    ) -> Result<AppendOutcome, DomainError> {
        self.check_failure()?;

        let racing = std::mem::take(&mut *lock(&self.racing_writes));
        let mut events = lock(&self.events);
        events.extend(racing);

        let current = latest_matching(&events, |stored| {
            stored.worker_id == event.worker_id && stored.location_id == event.location_id
        })
        .map(|stored| stored.id);

        if current != expected_previous {
            return Ok(AppendOutcome::Conflict);
        }

        events.push(event.clone());
        Ok(AppendOutcome::Appended(event.clone()))
    }

    async fn history(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
        limit: usize,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        self.check_failure()?;
        Ok(lock(&self.events)
            .iter()
            .rev()
            .filter(|event| {
                event.worker_id == worker_id
                    && event.organization_id == organization_id
                    && location_id.map_or(true, |id| event.location_id == id)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
