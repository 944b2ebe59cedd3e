//! Status and history query tests

use uuid::Uuid;

use super::Harness;
use crate::domain::entities::{ClockEventType, Location};
use crate::domain::value_objects::ClockCommand;

#[tokio::test]
async fn test_status_without_events() {
    let harness = Harness::new();
    let status = harness
        .service
        .get_status(harness.worker, harness.org, None)
        .await
        .unwrap();
    assert!(status.last_event.is_none());
    assert!(!status.is_clocked_in);
}

#[tokio::test]
async fn test_status_follows_latest_event() {
    let harness = Harness::new();

    harness
        .service
        .clock(harness.command(ClockEventType::ClockIn))
        .await
        .unwrap();
    let status = harness
        .service
        .get_status(harness.worker, harness.org, Some(harness.site.id))
        .await
        .unwrap();
    assert!(status.is_clocked_in);
    let last = status.last_event.unwrap();
    assert_eq!(last.event_type, ClockEventType::ClockIn);
    assert_eq!(last.location_name, "Warsaw Office");

    harness
        .service
        .clock(harness.command(ClockEventType::ClockOut))
        .await
        .unwrap();
    let status = harness
        .service
        .get_status(harness.worker, harness.org, None)
        .await
        .unwrap();
    assert!(!status.is_clocked_in);
}

#[tokio::test]
async fn test_status_scoped_to_location_and_org() {
    let harness = Harness::new();
    harness
        .service
        .clock(harness.command(ClockEventType::ClockIn))
        .await
        .unwrap();

    let elsewhere = harness
        .service
        .get_status(harness.worker, harness.org, Some(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(elsewhere.last_event.is_none());

    let other_org = harness
        .service
        .get_status(harness.worker, Uuid::new_v4(), None)
        .await
        .unwrap();
    assert!(!other_org.is_clocked_in);
}

#[tokio::test]
async fn test_status_writes_no_audit() {
    let harness = Harness::new();
    harness
        .service
        .get_status(harness.worker, harness.org, None)
        .await
        .unwrap();
    harness
        .service
        .get_history(harness.worker, harness.org, None, 10)
        .await
        .unwrap();
    assert!(harness.audit.get_all_entries().is_empty());
}

#[tokio::test]
async fn test_history_lists_both_events_newest_first() {
    let harness = Harness::new();
    let depot = Location::new(harness.org, "Depot")
        .with_geofence(52.2297, 21.0122, 100)
        .with_rcp_enabled(true);
    harness.locations.insert(depot.clone());

    for event_type in [ClockEventType::ClockIn, ClockEventType::ClockOut] {
        harness
            .service
            .clock(harness.command(event_type))
            .await
            .unwrap();
    }
    let token = harness.tokens.issue(harness.org, depot.id, 60).unwrap().token;
    harness
        .service
        .clock(ClockCommand::new(
            harness.worker,
            harness.org,
            token,
            ClockEventType::ClockIn,
            52.2297,
            21.0122,
        ))
        .await
        .unwrap();

    let history = harness
        .service
        .get_history(harness.worker, harness.org, None, 10)
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].location_name, "Depot");
    assert_eq!(history[0].distance_meters, 0);
    assert_eq!(history[1].event_type, ClockEventType::ClockOut);
    assert_eq!(history[2].event_type, ClockEventType::ClockIn);
    assert_eq!(history[2].location_name, "Warsaw Office");

    let at_site = harness
        .service
        .get_history(harness.worker, harness.org, Some(harness.site.id), 10)
        .await
        .unwrap();
    assert_eq!(at_site.len(), 2);

    let limited = harness
        .service
        .get_history(harness.worker, harness.org, None, 0)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}
