//! Tests for the mock audit sink

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{AuditAction, AuditEntry, ENTITY_CLOCK_EVENT};
use crate::repositories::audit::MockAuditLogRepository;
use crate::repositories::AuditLogRepository;

#[tokio::test]
async fn test_mock_create_and_filter() {
    let repo = MockAuditLogRepository::new();
    let actor = Uuid::new_v4();
    let org = Uuid::new_v4();

    let success = AuditEntry::new(actor, org, AuditAction::ClockIn, ENTITY_CLOCK_EVENT);
    let denial = AuditEntry::new(actor, org, AuditAction::ClockDenied, ENTITY_CLOCK_EVENT)
        .with_after(json!({ "reason": "RATE_LIMITED" }));

    repo.create(&success).await.unwrap();
    repo.create(&denial).await.unwrap();

    assert_eq!(repo.get_all_entries().len(), 2);
    assert_eq!(repo.entries_with_action(AuditAction::ClockIn).len(), 1);
    assert_eq!(repo.denial_reasons_for(actor), vec!["RATE_LIMITED".to_string()]);
    assert!(repo.denial_reasons_for(Uuid::new_v4()).is_empty());
}

#[tokio::test]
async fn test_mock_failure_injection() {
    let repo = MockAuditLogRepository::new();
    repo.set_should_fail(true);

    let entry = AuditEntry::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        AuditAction::QrGenerate,
        ENTITY_CLOCK_EVENT,
    );
    assert!(repo.create(&entry).await.is_err());
    assert!(repo.get_all_entries().is_empty());

    repo.set_should_fail(false);
    assert!(repo.create(&entry).await.is_ok());
}
