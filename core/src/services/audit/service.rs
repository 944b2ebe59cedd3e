//! Audit service for recording clock activity.
//!
//! Every QR issuance, successful clock and denied clock attempt produces one
//! entry. Sink failures are logged and swallowed: an unavailable audit store
//! never turns a successful clock into a failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::task;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::{
    AuditAction, AuditEntry, ClockEvent, ClockEventType, ENTITY_CLOCK_EVENT, ENTITY_LOCATION,
};
use crate::errors::ClockError;
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether to run audit writes on a spawned task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { async_writes: true }
    }
}

/// Best-effort writer in front of the audit sink
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record a QR issuance for a location
    pub async fn record_qr_generated(
        &self,
        actor_id: Uuid,
        organization_id: Uuid,
        location_id: Uuid,
        expires_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) {
        let entry = AuditEntry::new(
            actor_id,
            organization_id,
            AuditAction::QrGenerate,
            ENTITY_LOCATION,
        )
        .with_entity(location_id)
        .with_after(json!({ "tokenExpiresAt": expires_at }))
        .with_request_context(ip_address, user_agent);

        self.record(entry).await;
    }

    /// Record a persisted clock event
    pub async fn record_clock(&self, event: &ClockEvent, location_name: &str) {
        let action = match event.event_type {
            ClockEventType::ClockIn => AuditAction::ClockIn,
            ClockEventType::ClockOut => AuditAction::ClockOut,
        };

        let entry = AuditEntry::new(
            event.worker_id,
            event.organization_id,
            action,
            ENTITY_CLOCK_EVENT,
        )
        .with_entity(event.id)
        .with_after(json!({
            "locationId": event.location_id,
            "locationName": location_name,
            "distanceMeters": event.distance_meters,
            "accuracyMeters": event.accuracy_meters,
            "happenedAt": event.happened_at,
        }))
        .with_request_context(event.ip_address.clone(), event.user_agent.clone());

        self.record(entry).await;
    }

    /// Record a rejected clock attempt with its reason code
    #[allow(clippy::too_many_arguments)]
    pub async fn record_denial(
        &self,
        actor_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
        event_type: ClockEventType,
        error: &ClockError,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) {
        let mut context = error.audit_context();
        context["requestedType"] = json!(event_type.as_str());
        if let Some(location_id) = location_id {
            context["locationId"] = json!(location_id);
        }

        let entry = AuditEntry::new(
            actor_id,
            organization_id,
            AuditAction::ClockDenied,
            ENTITY_CLOCK_EVENT,
        )
        .with_after(context)
        .with_request_context(ip_address, user_agent);

        self.record(entry).await;
    }

    /// Hand an entry to the sink, logging (never returning) failures
    pub async fn record(&self, entry: AuditEntry) {
        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);

            task::spawn(async move {
                if let Err(e) = repository.create(&entry).await {
                    warn!(action = entry.action.as_str(), error = %e, "Failed to write audit entry");
                }
            });
        } else if let Err(e) = self.repository.create(&entry).await {
            warn!(action = entry.action.as_str(), error = %e, "Failed to write audit entry");
        }
    }
}
