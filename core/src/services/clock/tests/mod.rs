//! Shared fixtures for clock service tests

mod status_tests;

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{ClockEventType, Location};
use crate::domain::value_objects::ClockCommand;
use crate::repositories::{
    MockAuditLogRepository, MockClockEventRepository, MockLocationRepository,
    MockQrConfigRepository,
};
use crate::services::audit::{AuditService, AuditServiceConfig};
use crate::services::clock::{ClockService, ClockServiceConfig};
use crate::services::rate_limit::{InMemoryRateLimiter, RateLimiterConfig};
use crate::services::token::{QrTokenConfig, QrTokenService, SigningSecret};

pub(super) const SITE_LAT: f64 = 52.2297;
pub(super) const SITE_LNG: f64 = 21.0122;
/// ~50 m north of the site
pub(super) const NEAR_LAT: f64 = 52.23015;
/// ~200 m north of the site
pub(super) const FAR_LAT: f64 = 52.2315;

pub(super) type TestClockService = ClockService<
    MockLocationRepository,
    MockQrConfigRepository,
    MockClockEventRepository,
    MockAuditLogRepository,
    InMemoryRateLimiter,
>;

pub(super) struct Harness {
    pub service: Arc<TestClockService>,
    pub tokens: Arc<QrTokenService>,
    pub locations: Arc<MockLocationRepository>,
    pub qr_configs: Arc<MockQrConfigRepository>,
    pub events: Arc<MockClockEventRepository>,
    pub audit: Arc<MockAuditLogRepository>,
    pub org: Uuid,
    pub worker: Uuid,
    pub site: Location,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ClockServiceConfig::default(), RateLimiterConfig::default())
    }

    pub fn with_config(config: ClockServiceConfig, rate_limit: RateLimiterConfig) -> Self {
        let org = Uuid::new_v4();
        let site = Location::new(org, "Warsaw Office")
            .with_geofence(SITE_LAT, SITE_LNG, 100)
            .with_max_accuracy(100.0)
            .with_rcp_enabled(true);

        let locations = Arc::new(MockLocationRepository::new());
        locations.insert(site.clone());
        let qr_configs = Arc::new(MockQrConfigRepository::new());
        let events = Arc::new(MockClockEventRepository::new());
        let audit = Arc::new(MockAuditLogRepository::new());

        let tokens = Arc::new(
            QrTokenService::new(QrTokenConfig::new(
                SigningSecret::new("clock-service-test-secret-0123456789").unwrap(),
            ))
            .unwrap(),
        );
        let audit_service = Arc::new(AuditService::new(
            Arc::clone(&audit),
            AuditServiceConfig {
                async_writes: false,
            },
        ));

        let service = Arc::new(ClockService::new(
            Arc::clone(&locations),
            Arc::clone(&qr_configs),
            Arc::clone(&events),
            audit_service,
            Arc::new(InMemoryRateLimiter::new(rate_limit)),
            Arc::clone(&tokens),
            config,
        ));

        Self {
            service,
            tokens,
            locations,
            qr_configs,
            events,
            audit,
            org,
            worker: Uuid::new_v4(),
            site,
        }
    }

    /// A valid token for the harness site
    pub fn token(&self) -> String {
        self.tokens
            .issue(self.org, self.site.id, 3600)
            .unwrap()
            .token
    }

    /// A clock command from just inside the geofence
    pub fn command(&self, event_type: ClockEventType) -> ClockCommand {
        ClockCommand::new(
            self.worker,
            self.org,
            self.token(),
            event_type,
            NEAR_LAT,
            SITE_LNG,
        )
        .with_accuracy(50.0)
    }

    pub fn denials(&self) -> Vec<String> {
        self.audit.denial_reasons_for(self.worker)
    }
}

/// Wire code of a failed clock result
pub(super) fn code_of<T: std::fmt::Debug>(result: crate::errors::DomainResult<T>) -> String {
    result
        .unwrap_err()
        .as_clock_error()
        .expect("expected a clock rejection")
        .code()
        .to_string()
}
