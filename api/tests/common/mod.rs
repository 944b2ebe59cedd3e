//! Shared fixtures for HTTP tests: the real clock service over in-memory mocks

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use rcp_api::AppState;
use rcp_core::domain::entities::Location;
use rcp_core::repositories::{
    MockAuditLogRepository, MockClockEventRepository, MockLocationRepository,
    MockQrConfigRepository,
};
use rcp_core::services::{
    AuditService, AuditServiceConfig, ClockRateLimiter, ClockService, ClockServiceConfig,
    InMemoryRateLimiter, QrTokenConfig, QrTokenService, RateLimiterConfig, SigningSecret,
};

pub const SITE_LAT: f64 = 52.2297;
pub const SITE_LNG: f64 = 21.0122;
/// ~50 m north of the site
pub const NEAR_LAT: f64 = 52.23015;
/// ~200 m north of the site
pub const FAR_LAT: f64 = 52.2315;

pub const BASE_URL: &str = "https://app.rcp.example";

pub type TestState = AppState<
    MockLocationRepository,
    MockQrConfigRepository,
    MockClockEventRepository,
    MockAuditLogRepository,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub tokens: Arc<QrTokenService>,
    pub locations: Arc<MockLocationRepository>,
    pub events: Arc<MockClockEventRepository>,
    pub audit: Arc<MockAuditLogRepository>,
    pub org: Uuid,
    pub worker: Uuid,
    pub site: Location,
}

impl TestContext {
    pub fn new() -> Self {
        let org = Uuid::new_v4();
        let site = Location::new(org, "Warsaw Office")
            .with_geofence(SITE_LAT, SITE_LNG, 100)
            .with_max_accuracy(50.0)
            .with_rcp_enabled(true);

        let locations = Arc::new(MockLocationRepository::new());
        locations.insert(site.clone());
        let events = Arc::new(MockClockEventRepository::new());
        let audit = Arc::new(MockAuditLogRepository::new());

        let tokens = Arc::new(
            QrTokenService::new(QrTokenConfig::new(
                SigningSecret::new("http-test-signing-secret-0123456789").unwrap(),
            ))
            .unwrap(),
        );
        let rate_limiter: Arc<dyn ClockRateLimiter> =
            Arc::new(InMemoryRateLimiter::new(RateLimiterConfig::default()));

        let service = Arc::new(ClockService::new(
            Arc::clone(&locations),
            Arc::new(MockQrConfigRepository::new()),
            Arc::clone(&events),
            Arc::new(AuditService::new(
                Arc::clone(&audit),
                AuditServiceConfig {
                    async_writes: false,
                },
            )),
            rate_limiter,
            Arc::clone(&tokens),
            ClockServiceConfig::default(),
        ));

        Self {
            state: web::Data::new(
                AppState::new(service).with_public_base_url(Some(BASE_URL.to_string())),
            ),
            tokens,
            locations,
            events,
            audit,
            org,
            worker: Uuid::new_v4(),
            site,
        }
    }

    pub fn token(&self) -> String {
        self.tokens.issue(self.org, self.site.id, 3600).unwrap().token
    }

    pub fn clock_body(&self, event_type: &str, lat: f64) -> serde_json::Value {
        serde_json::json!({
            "actorId": self.worker,
            "organizationId": self.org,
            "token": self.token(),
            "type": event_type,
            "clientLat": lat,
            "clientLng": SITE_LNG,
            "accuracyMeters": 10.0
        })
    }
}
