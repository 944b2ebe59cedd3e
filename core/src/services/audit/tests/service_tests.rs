//! Tests for the AuditService.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{AuditAction, ClockEvent, ClockEventType, ENTITY_LOCATION};
use crate::errors::ClockError;
use crate::repositories::audit::MockAuditLogRepository;
use crate::services::audit::{AuditService, AuditServiceConfig};

fn sync_service(repo: &Arc<MockAuditLogRepository>) -> AuditService<MockAuditLogRepository> {
    AuditService::new(
        Arc::clone(repo),
        AuditServiceConfig {
            async_writes: false,
        },
    )
}

#[tokio::test]
async fn test_record_qr_generated() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);
    let location_id = Uuid::new_v4();

    service
        .record_qr_generated(
            Uuid::new_v4(),
            Uuid::new_v4(),
            location_id,
            Utc::now(),
            Some("10.0.0.1".to_string()),
            None,
        )
        .await;

    let entries = repo.get_all_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::QrGenerate);
    assert_eq!(entries[0].entity_type, ENTITY_LOCATION);
    assert_eq!(entries[0].entity_id, Some(location_id));
    assert!(entries[0].after.as_ref().unwrap().get("tokenExpiresAt").is_some());
}

#[tokio::test]
async fn test_record_clock_uses_event_type() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);
    let event = ClockEvent::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        ClockEventType::ClockOut,
        52.2297,
        21.0122,
        37,
        "hash",
    );

    service.record_clock(&event, "Warehouse").await;

    let entries = repo.get_all_entries();
    assert_eq!(entries[0].action, AuditAction::ClockOut);
    assert_eq!(entries[0].entity_id, Some(event.id));
    let after = entries[0].after.as_ref().unwrap();
    assert_eq!(after["locationName"], "Warehouse");
    assert_eq!(after["distanceMeters"], 37);
}

#[tokio::test]
async fn test_record_denial_carries_reason() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);
    let actor = Uuid::new_v4();

    service
        .record_denial(
            actor,
            Uuid::new_v4(),
            None,
            ClockEventType::ClockIn,
            &ClockError::TokenExpired,
            None,
            None,
        )
        .await;

    assert_eq!(repo.denial_reasons_for(actor), vec!["TOKEN_EXPIRED".to_string()]);
    let entry = &repo.get_all_entries()[0];
    assert_eq!(entry.after.as_ref().unwrap()["requestedType"], "CLOCK_IN");
}

#[tokio::test]
async fn test_sink_failure_is_swallowed() {
    let repo = Arc::new(MockAuditLogRepository::new());
    repo.set_should_fail(true);
    let service = sync_service(&repo);

    // Must not panic or surface the error
    service
        .record_denial(
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            ClockEventType::ClockIn,
            &ClockError::AlreadyClockedIn,
            None,
            None,
        )
        .await;

    assert!(repo.get_all_entries().is_empty());
}

#[tokio::test]
async fn test_async_writes_land_eventually() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = AuditService::new(Arc::clone(&repo), AuditServiceConfig::default());

    service
        .record_qr_generated(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc::now(),
            None,
            None,
        )
        .await;

    for _ in 0..50 {
        if !repo.get_all_entries().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(repo.get_all_entries().len(), 1);
}
