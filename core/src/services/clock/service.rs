//! Main clock service implementation

use std::collections::HashMap;
use std::sync::Arc;

use rcp_shared::geo::Coordinate;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::{ClockEvent, ClockEventType, Location};
use crate::domain::value_objects::{
    ClockCommand, ClockEventView, ClockResult, ClockStatus, IssueQrCommand, LastEventView,
    QrIssueResult,
};
use crate::errors::{ClockError, DomainError, DomainResult};
use crate::repositories::{
    AppendOutcome, AuditLogRepository, ClockEventRepository, LocationRepository,
    QrConfigRepository,
};
use crate::services::audit::AuditService;
use crate::services::rate_limit::{ClockRateLimiter, RateLimitDecision, RateLimitKey};
use crate::services::token::QrTokenService;

use super::config::ClockServiceConfig;

/// Orchestrates QR issuance, clock attempts and status queries
///
/// The rate limiter defaults to a trait object so the backend (in-memory or
/// shared) can be picked at startup.
pub struct ClockService<L, Q, E, A, R = dyn ClockRateLimiter>
where
    L: LocationRepository,
    Q: QrConfigRepository,
    E: ClockEventRepository,
    A: AuditLogRepository + 'static,
    R: ClockRateLimiter + ?Sized,
{
    locations: Arc<L>,
    qr_configs: Arc<Q>,
    events: Arc<E>,
    audit: Arc<AuditService<A>>,
    rate_limiter: Arc<R>,
    token_service: Arc<QrTokenService>,
    config: ClockServiceConfig,
}

impl<L, Q, E, A, R> ClockService<L, Q, E, A, R>
where
    L: LocationRepository,
    Q: QrConfigRepository,
    E: ClockEventRepository,
    A: AuditLogRepository + 'static,
    R: ClockRateLimiter + ?Sized,
{
    /// Create a new clock service
    ///
    /// # Arguments
    ///
    /// * `locations` - Location directory
    /// * `qr_configs` - Per-location QR config store
    /// * `events` - Append-only clock event store
    /// * `audit` - Audit writer for issuance, clocks and denials
    /// * `rate_limiter` - Attempt budget per worker and location
    /// * `token_service` - QR token signer / verifier
    /// * `config` - Service configuration
    pub fn new(
        locations: Arc<L>,
        qr_configs: Arc<Q>,
        events: Arc<E>,
        audit: Arc<AuditService<A>>,
        rate_limiter: Arc<R>,
        token_service: Arc<QrTokenService>,
        config: ClockServiceConfig,
    ) -> Self {
        Self {
            locations,
            qr_configs,
            events,
            audit,
            rate_limiter,
            token_service,
            config,
        }
    }

    /// Mint a QR deep link for a location
    ///
    /// The location must belong to the organization, have RCP enabled and a
    /// complete geofence. Its QR config is created on first use.
    pub async fn issue_qr(&self, command: IssueQrCommand) -> DomainResult<QrIssueResult> {
        let location = self
            .locations
            .find_by_id_and_org(command.location_id, command.organization_id)
            .await?
            .ok_or_else(|| ClockError::NotFound {
                resource: format!("location {}", command.location_id),
            })?;

        if !location.rcp_enabled {
            return Err(ClockError::validation("RCP is not enabled for this location").into());
        }
        if location.geofence().is_none() {
            return Err(ClockError::validation(
                "Location needs latitude, longitude and radius before issuing QR codes",
            )
            .into());
        }

        let qr_config = self
            .qr_configs
            .get_or_create(location.id, self.token_service.default_ttl_seconds())
            .await?;

        let issued = self.token_service.issue(
            command.organization_id,
            location.id,
            qr_config.token_ttl_seconds,
        )?;

        let qr_url = format!(
            "{}{}?token={}",
            command.base_url.trim_end_matches('/'),
            self.config.qr_path,
            issued.token
        );

        self.audit
            .record_qr_generated(
                command.actor_id,
                command.organization_id,
                location.id,
                issued.expires_at,
                command.ip_address,
                command.user_agent,
            )
            .await;

        info!(
            actor_id = %command.actor_id,
            location_id = %location.id,
            expires_at = %issued.expires_at,
            "Issued QR token"
        );

        Ok(QrIssueResult {
            qr_url,
            token_expires_at: issued.expires_at,
        })
    }

    /// Run a clock attempt through the validation pipeline
    ///
    /// Every rejection from the pipeline is audited as a denial before being
    /// returned. Storage failures propagate unaudited.
    pub async fn clock(&self, command: ClockCommand) -> DomainResult<ClockResult> {
        validate_command(&command)?;

        let mut location_id = None;
        match self.run_pipeline(&command, &mut location_id).await {
            Ok(result) => Ok(result),
            Err(DomainError::Clock(rejection)) => {
                warn!(
                    worker_id = %command.actor_id,
                    location_id = ?location_id,
                    code = rejection.code(),
                    "Clock attempt denied"
                );
                self.audit
                    .record_denial(
                        command.actor_id,
                        command.organization_id,
                        location_id,
                        command.event_type,
                        &rejection,
                        command.ip_address.clone(),
                        command.user_agent.clone(),
                    )
                    .await;
                Err(rejection.into())
            }
            Err(e) => {
                error!(
                    worker_id = %command.actor_id,
                    location_id = ?location_id,
                    error = %e,
                    "Clock attempt failed"
                );
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        command: &ClockCommand,
        location_id: &mut Option<Uuid>,
    ) -> DomainResult<ClockResult> {
        // Token
        let payload = self
            .token_service
            .verify(&command.token)
            .map_err(ClockError::from)?;
        *location_id = Some(payload.location_id);

        // Tenant
        if payload.organization_id != command.organization_id {
            return Err(ClockError::forbidden("Token was issued for another organization").into());
        }

        // Location
        let location = self
            .locations
            .find_by_id_and_org(payload.location_id, command.organization_id)
            .await?
            .ok_or_else(|| ClockError::forbidden("Location is not available"))?;
        if !location.rcp_enabled {
            return Err(ClockError::forbidden("RCP is disabled for this location").into());
        }
        let geofence = location.geofence().ok_or_else(|| {
            ClockError::validation("Location has no geofence configured")
        })?;

        // Rate limit
        let key = RateLimitKey::new(command.actor_id, location.id);
        if let RateLimitDecision::Denied {
            retry_after_seconds,
        } = self.rate_limiter.allow(&key).await?
        {
            return Err(ClockError::RateLimited {
                retry_after_seconds,
            }
            .into());
        }

        // Accuracy
        if let Some(accuracy) = command.accuracy_meters {
            if accuracy > location.max_accuracy_meters {
                return Err(ClockError::LowAccuracy {
                    accuracy_meters: accuracy,
                    max_accuracy_meters: location.max_accuracy_meters,
                }
                .into());
            }
        }

        // Geofence
        let client = Coordinate::new(command.client_latitude, command.client_longitude);
        let distance = geofence.distance_to(&client);
        if !geofence.contains_distance(distance) {
            return Err(ClockError::OutsideGeofence {
                distance_meters: distance,
                radius_meters: geofence.radius_meters,
            }
            .into());
        }

        // Alternation + persist
        let token_hash = self.token_service.hash(&command.token);
        let event = self
            .append_alternating(command, &location, distance, token_hash)
            .await?;

        self.audit.record_clock(&event, &location.name).await;

        info!(
            worker_id = %event.worker_id,
            location_id = %event.location_id,
            event_type = %event.event_type,
            distance_meters = event.distance_meters,
            "Clock event recorded"
        );

        Ok(ClockResult::from_event(&event, location.name))
    }

    /// Check alternation against the latest event and append atomically,
    /// re-checking whenever a concurrent attempt wins the race
    async fn append_alternating(
        &self,
        command: &ClockCommand,
        location: &Location,
        distance: u32,
        token_hash: String,
    ) -> DomainResult<ClockEvent> {
        for attempt in 0..=self.config.append_retries {
            let last = self.events.most_recent(command.actor_id, location.id).await?;
            self.check_alternation(last.as_ref(), command.event_type)?;

            let event = ClockEvent::new(
                command.actor_id,
                command.organization_id,
                location.id,
                command.event_type,
                command.client_latitude,
                command.client_longitude,
                distance,
                token_hash.clone(),
            )
            .with_accuracy(command.accuracy_meters)
            .with_client_time(command.client_time)
            .with_request_context(command.ip_address.clone(), command.user_agent.clone());

            match self
                .events
                .append_if_latest(&event, last.map(|e| e.id))
                .await?
            {
                AppendOutcome::Appended(stored) => return Ok(stored),
                AppendOutcome::Conflict => {
                    debug!(
                        worker_id = %command.actor_id,
                        location_id = %location.id,
                        attempt,
                        "Concurrent clock event detected, re-validating"
                    );
                }
            }
        }

        Err(DomainError::internal(format!(
            "Clock event could not be appended after {} attempts",
            self.config.append_retries + 1
        )))
    }

    fn check_alternation(
        &self,
        last: Option<&ClockEvent>,
        requested: ClockEventType,
    ) -> Result<(), ClockError> {
        match (last.map(|event| event.event_type), requested) {
            (Some(ClockEventType::ClockIn), ClockEventType::ClockIn) => {
                Err(ClockError::AlreadyClockedIn)
            }
            (Some(ClockEventType::ClockOut), ClockEventType::ClockOut) => {
                Err(ClockError::AlreadyClockedOut)
            }
            (None, ClockEventType::ClockOut) if self.config.require_clock_in_first => {
                Err(ClockError::AlreadyClockedOut)
            }
            _ => Ok(()),
        }
    }

    /// Latest event for a worker and whether they are currently clocked in
    ///
    /// Read-only; nothing is audited.
    pub async fn get_status(
        &self,
        actor_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
    ) -> DomainResult<ClockStatus> {
        let last = self
            .events
            .most_recent_in_org(actor_id, organization_id, location_id)
            .await?;

        let last_event = match last {
            Some(event) => {
                let location_name = self
                    .location_name(event.location_id, organization_id)
                    .await?;
                Some(LastEventView {
                    event_type: event.event_type,
                    happened_at: event.happened_at,
                    location_name,
                })
            }
            None => None,
        };

        Ok(ClockStatus::from_last_event(last_event))
    }

    /// A worker's clock events, newest first
    pub async fn get_history(
        &self,
        actor_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
        limit: usize,
    ) -> DomainResult<Vec<ClockEventView>> {
        let limit = limit.clamp(1, self.config.max_history_limit);
        let events = self
            .events
            .history(actor_id, organization_id, location_id, limit)
            .await?;

        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(events.len());
        for event in &events {
            if !names.contains_key(&event.location_id) {
                let name = self
                    .location_name(event.location_id, organization_id)
                    .await?;
                names.insert(event.location_id, name);
            }
            let name = names.get(&event.location_id).cloned().unwrap_or_default();
            views.push(ClockEventView::from_event(event, name));
        }

        Ok(views)
    }

    async fn location_name(&self, location_id: Uuid, organization_id: Uuid) -> DomainResult<String> {
        Ok(self
            .locations
            .find_by_id_and_org(location_id, organization_id)
            .await?
            .map(|location| location.name)
            .unwrap_or_default())
    }
}

/// Reject coordinates and accuracy values no device could report
fn validate_command(command: &ClockCommand) -> Result<(), ClockError> {
    let client = Coordinate::new(command.client_latitude, command.client_longitude);
    if !client.is_valid() {
        return Err(ClockError::validation(
            "Client coordinates must be a valid latitude / longitude pair",
        ));
    }
    if let Some(accuracy) = command.accuracy_meters {
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(ClockError::validation("Accuracy must be a non-negative number"));
        }
    }
    Ok(())
}
