//! Integration tests for tracking ingestion.
//!
//! Drives the real [`TrackingIngestor`] against the canned [`FakeTracker`]
//! and, for the end-to-end case, persists the resulting order through the
//! coordinator.

use gated_core::{Carrier, SIMULATION_MARKER, TrackingStatus};
use gated_integration_tests::{FakeStore, FakeTracker, test_owner};
use gated_sync::{
    DegradeReason, IngestSource, Session, SyncCoordinator, TrackingError, TrackingIngestor,
    TrackingRequest,
};

fn request() -> TrackingRequest {
    TrackingRequest {
        carrier: Carrier::Usps,
        tracking_number: "9400100000000000000000".to_owned(),
        item_name: "Selvedge Denim".to_owned(),
    }
}

const FULL_PAYLOAD: &str = r#"{
    "status": "in_transit",
    "est_delivery_date": "2025-06-12T00:00:00Z",
    "tracking_details": [
        {
            "datetime": "2025-06-08T09:15:00Z",
            "tracking_location": {"city": "Memphis", "state": "TN"},
            "message": "Departed facility",
            "status": "in_transit"
        },
        {
            "datetime": "2025-06-10T14:05:00Z",
            "tracking_location": null,
            "message": "Arrived at sort center",
            "status": "in_transit"
        }
    ]
}"#;

// =============================================================================
// Degraded paths
// =============================================================================

#[tokio::test]
async fn unconfigured_endpoint_degrades_to_simulated_data() {
    let ingestor: TrackingIngestor<FakeTracker> = TrackingIngestor::unconfigured();

    let outcome = ingestor.ingest(&request()).await;

    assert!(matches!(
        outcome.source,
        IngestSource::Degraded(DegradeReason::Unconfigured)
    ));
    assert!(outcome.order.is_simulated());
    assert_eq!(outcome.order.status, TrackingStatus::PreTransit);
    assert_eq!(outcome.order.estimated_delivery, "Calculating...");
    assert!(outcome.order.id.is_temporary());
}

#[tokio::test]
async fn server_error_degrades_and_marks_the_order() {
    let ingestor = TrackingIngestor::new(FakeTracker::failing_with(500));

    let outcome = ingestor.ingest(&request()).await;

    assert!(matches!(
        outcome.source,
        IngestSource::Degraded(DegradeReason::Fetch(TrackingError::Api {
            status: 500,
            ..
        }))
    ));
    let latest = outcome.order.latest_event().unwrap();
    assert!(latest.description.contains(SIMULATION_MARKER));
    assert_eq!(latest.location, "Origin Scan");
}

#[tokio::test]
async fn malformed_body_degrades_like_any_other_failure() {
    let ingestor = TrackingIngestor::new(FakeTracker::with_body(r#"{"status": 7}"#));

    let outcome = ingestor.ingest(&request()).await;

    assert!(matches!(
        outcome.source,
        IngestSource::Degraded(DegradeReason::Fetch(TrackingError::Parse(_)))
    ));
    assert!(outcome.order.is_simulated());
}

// =============================================================================
// Confirmed path
// =============================================================================

#[tokio::test]
async fn confirmed_response_is_normalized() {
    let ingestor = TrackingIngestor::new(FakeTracker::with_body(FULL_PAYLOAD));

    let outcome = ingestor.ingest(&request()).await;
    let order = outcome.order;

    assert!(matches!(outcome.source, IngestSource::Confirmed));
    assert!(!order.is_simulated());
    assert_eq!(order.status, TrackingStatus::InTransit);
    assert_eq!(order.tracking_number, "9400100000000000000000");
    assert_eq!(order.item_name, "Selvedge Denim");
    assert_eq!(order.estimated_delivery, "2025-06-12T00:00:00Z");

    // Provider history arrives oldest-first and is reversed for display.
    assert_eq!(order.history.len(), 2);
    assert_eq!(order.history[0].location, "Processing Center");
    assert_eq!(order.history[0].description, "Arrived at sort center");
    assert_eq!(order.history[1].location, "Memphis, TN");
    assert_eq!(order.history[1].description, "Departed facility");
    assert_eq!(order.history[1].date, "June 8, 9:15 AM");
}

#[tokio::test]
async fn unknown_provider_status_falls_back_to_pre_transit() {
    let ingestor = TrackingIngestor::new(FakeTracker::with_body(
        r#"{"status": "held_at_customs", "est_delivery_date": null}"#,
    ));

    let outcome = ingestor.ingest(&request()).await;

    assert!(matches!(outcome.source, IngestSource::Confirmed));
    assert_eq!(outcome.order.status, TrackingStatus::PreTransit);
    assert_eq!(outcome.order.estimated_delivery, "Unknown");
}

#[tokio::test]
async fn empty_history_gets_a_placeholder_event() {
    let ingestor = TrackingIngestor::new(FakeTracker::with_body(
        r#"{"status": "delivered", "est_delivery_date": "June 1, 2025"}"#,
    ));

    let outcome = ingestor.ingest(&request()).await;

    assert_eq!(outcome.order.status, TrackingStatus::Delivered);
    let latest = outcome.order.latest_event().unwrap();
    assert_eq!(latest.description, "Tracking info received (No History)");
    assert_eq!(latest.location, "N/A");
    assert!(!outcome.order.is_simulated());
}

// =============================================================================
// Ingest then persist
// =============================================================================

#[tokio::test]
async fn ingested_order_persists_through_the_coordinator() {
    let ingestor = TrackingIngestor::new(FakeTracker::with_body(FULL_PAYLOAD));
    let coordinator = SyncCoordinator::new(Session::new(test_owner()), FakeStore::new());

    let outcome = ingestor.ingest(&request()).await;
    let temp_id = outcome.order.id.clone();
    assert!(temp_id.is_temporary());

    let confirmed_id = coordinator.create_order(outcome.order).await.unwrap();
    assert_ne!(confirmed_id, temp_id);

    let snapshot = coordinator.session().orders().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, confirmed_id);
    assert_eq!(snapshot[0].status, TrackingStatus::InTransit);
    assert_eq!(snapshot[0].history.len(), 2);
}

#[tokio::test]
async fn degraded_order_persists_like_a_confirmed_one() {
    let ingestor: TrackingIngestor<FakeTracker> = TrackingIngestor::unconfigured();
    let coordinator = SyncCoordinator::new(Session::new(test_owner()), FakeStore::new());

    let outcome = ingestor.ingest(&request()).await;
    let confirmed_id = coordinator.create_order(outcome.order).await.unwrap();

    let snapshot = coordinator.session().orders().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, confirmed_id);
    assert!(snapshot[0].is_simulated());
}
