//! Integration tests for the optimistic sync coordinator.
//!
//! Each test drives the real [`SyncCoordinator`] against the in-memory
//! [`FakeStore`]. Tests that need a confirmation in flight use the gated
//! store: the spawned create parks at the insert gate, the test acts, then
//! a permit lets the confirmation land.

use chrono::NaiveDate;
use gated_core::{Carrier, Category, EntityId, Garment, Release, TrackingStatus};
use gated_integration_tests::{FakeStore, seeded_garment_row, test_owner};
use gated_sync::{Session, SyncCoordinator};

fn garment(name: &str) -> Garment {
    Garment {
        id: EntityId::temporary(),
        name: name.to_owned(),
        brand: "Acme".to_owned(),
        category: Category::Tops,
        color: "Black".to_owned(),
        image_url: "https://example.com/img.png".to_owned(),
        date_added: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    }
}

fn release(name: &str) -> Release {
    Release {
        id: EntityId::temporary(),
        brand: "Acme".to_owned(),
        name: name.to_owned(),
        date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
        time: "10:00 AM UTC".to_owned(),
        image_url: "https://example.com/drop.png".to_owned(),
        notified: false,
        url: None,
    }
}

fn coordinator(store: FakeStore) -> SyncCoordinator<FakeStore> {
    SyncCoordinator::new(Session::new(test_owner()), store)
}

// =============================================================================
// Optimistic visibility and reconciliation
// =============================================================================

#[tokio::test]
async fn create_is_visible_before_the_store_confirms() {
    let (store, gate) = FakeStore::gated();
    let coordinator = coordinator(store);

    let new = garment("Wool Overcoat");
    let temp_id = new.id.clone();

    let create = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(new).await }
    });
    tokio::task::yield_now().await;

    // The insert is parked at the gate, but the entity is already listed.
    let snapshot = coordinator.session().garments().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, temp_id);
    assert!(snapshot[0].id.is_temporary());

    gate.add_permits(1);
    let confirmed_id = create.await.unwrap().unwrap();

    // Same entity, same position, server id.
    let snapshot = coordinator.session().garments().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, confirmed_id);
    assert!(!snapshot[0].id.is_temporary());
    assert_eq!(snapshot[0].name, "Wool Overcoat");
}

#[tokio::test]
async fn confirmation_preserves_position_among_siblings() {
    let (store, gate) = FakeStore::gated();
    let coordinator = coordinator(store);

    let first = garment("First");
    let second = garment("Second");
    let first_temp = first.id.clone();
    let second_temp = second.id.clone();

    let create_first = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(first).await }
    });
    tokio::task::yield_now().await;
    let create_second = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(second).await }
    });
    tokio::task::yield_now().await;

    // Newest-first: the second create sits on top of the first.
    let ids: Vec<EntityId> = coordinator
        .session()
        .garments()
        .snapshot()
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(ids, vec![second_temp, first_temp]);

    gate.add_permits(2);
    let first_id = create_first.await.unwrap().unwrap();
    let second_id = create_second.await.unwrap().unwrap();

    let snapshot = coordinator.session().garments().snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, second_id);
    assert_eq!(snapshot[1].id, first_id);
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn failed_insert_rolls_back_the_optimistic_entry() {
    let store = FakeStore::new();
    store.fail_inserts();
    let coordinator = coordinator(store);

    let result = coordinator.create_garment(garment("Doomed Jacket")).await;

    assert!(result.is_err());
    assert!(coordinator.session().garments().is_empty());
}

#[tokio::test]
async fn rollback_only_removes_the_failed_entry() {
    let store = FakeStore::new();
    let coordinator = coordinator(store.clone());

    let kept_id = coordinator
        .create_garment(garment("Kept Shirt"))
        .await
        .unwrap();

    store.fail_inserts();
    let result = coordinator.create_garment(garment("Doomed Shirt")).await;

    assert!(result.is_err());
    let snapshot = coordinator.session().garments().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, kept_id);
}

#[tokio::test]
async fn confirmation_after_local_delete_is_a_silent_no_op() {
    let (store, gate) = FakeStore::gated();
    let coordinator = coordinator(store);

    let new = garment("Fleeting Tee");
    let temp_id = new.id.clone();

    let create = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(new).await }
    });
    tokio::task::yield_now().await;

    // User deletes the entity while its insert is still in flight.
    coordinator.delete_garment(&temp_id).await;
    assert!(coordinator.session().garments().is_empty());

    gate.add_permits(1);
    let result = create.await.unwrap();

    // The create itself succeeded; the confirmed entity is not re-inserted.
    assert!(result.is_ok());
    assert!(coordinator.session().garments().is_empty());
}

// =============================================================================
// Deletes
// =============================================================================

#[tokio::test]
async fn delete_removes_locally_and_reaches_the_store() {
    let store = FakeStore::new();
    let coordinator = coordinator(store.clone());

    let id = coordinator
        .create_garment(garment("Old Hoodie"))
        .await
        .unwrap();
    coordinator.delete_garment(&id).await;

    assert!(coordinator.session().garments().is_empty());
    assert_eq!(store.deleted_ids(), vec![id.as_str().to_owned()]);
}

#[tokio::test]
async fn failed_remote_delete_keeps_the_local_removal() {
    let store = FakeStore::new();
    let coordinator = coordinator(store.clone());

    let id = coordinator
        .create_garment(garment("Stubborn Vest"))
        .await
        .unwrap();

    store.fail_deletes();
    coordinator.delete_garment(&id).await;

    // Local removal holds even though the store said no.
    assert!(coordinator.session().garments().is_empty());
    assert!(store.deleted_ids().is_empty());
}

#[tokio::test]
async fn deleting_an_absent_id_is_a_no_op() {
    let store = FakeStore::new();
    let coordinator = coordinator(store);

    coordinator
        .create_garment(garment("Only Garment"))
        .await
        .unwrap();
    coordinator.delete_garment(&EntityId::new("no-such-id")).await;

    assert_eq!(coordinator.session().garments().len(), 1);
}

// =============================================================================
// Session teardown
// =============================================================================

#[tokio::test]
async fn confirmation_after_sign_out_is_discarded() {
    let (store, gate) = FakeStore::gated();
    let coordinator = coordinator(store);

    let create = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(garment("Orphaned Coat")).await }
    });
    tokio::task::yield_now().await;
    assert_eq!(coordinator.session().garments().len(), 1);

    coordinator.session().sign_out();
    assert!(coordinator.session().garments().is_empty());

    gate.add_permits(1);
    let result = create.await.unwrap();

    // The store confirmed, but the session is gone; nothing reappears.
    assert!(result.is_ok());
    assert!(coordinator.session().garments().is_empty());
}

#[tokio::test]
async fn rollback_after_sign_out_is_discarded() {
    let (store, gate) = FakeStore::gated();
    store.fail_inserts();
    let coordinator = coordinator(store);

    let create = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.create_garment(garment("Doomed Orphan")).await }
    });
    tokio::task::yield_now().await;

    coordinator.session().sign_out();
    gate.add_permits(1);
    let result = create.await.unwrap();

    assert!(result.is_err());
    assert!(coordinator.session().garments().is_empty());
}

// =============================================================================
// Hydration
// =============================================================================

#[tokio::test]
async fn load_all_hydrates_and_converts() {
    let store = FakeStore::new();
    store.seed_garment(seeded_garment_row("42", "Seeded Shirt"));
    let coordinator = coordinator(store);

    coordinator.load_all().await.unwrap();

    let snapshot = coordinator.session().garments().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, EntityId::new("42"));
    // The store timestamp is truncated to a calendar date.
    assert_eq!(
        snapshot[0].date_added,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );
}

#[tokio::test]
async fn load_all_replaces_previous_contents() {
    let store = FakeStore::new();
    store.seed_garment(seeded_garment_row("1", "Fresh Shirt"));
    let coordinator = coordinator(store);

    coordinator.load_all().await.unwrap();
    coordinator.load_all().await.unwrap();

    // Hydration replaces, never appends.
    assert_eq!(coordinator.session().garments().len(), 1);
}

// =============================================================================
// Releases round-trip the display split
// =============================================================================

#[tokio::test]
async fn create_release_round_trips_date_and_time() {
    let store = FakeStore::new();
    let coordinator = coordinator(store);

    let new = release("Summer Capsule");
    let confirmed_id = coordinator.create_release(new).await.unwrap();

    let snapshot = coordinator.session().releases().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, confirmed_id);
    assert_eq!(snapshot[0].date, NaiveDate::from_ymd_opt(2025, 7, 4).unwrap());
    assert_eq!(snapshot[0].time, "10:00 AM UTC");
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn create_order_swaps_in_the_confirmed_id() {
    let store = FakeStore::new();
    let coordinator = coordinator(store);

    let order = gated_core::Order {
        id: EntityId::temporary(),
        tracking_number: "1Z999AA10123456784".to_owned(),
        carrier: Carrier::Ups,
        item_name: "Running Shoes".to_owned(),
        status: TrackingStatus::InTransit,
        estimated_delivery: "June 12, 2025".to_owned(),
        history: Vec::new(),
    };

    let confirmed_id = coordinator.create_order(order).await.unwrap();

    let snapshot = coordinator.session().orders().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, confirmed_id);
    assert_eq!(snapshot[0].status, TrackingStatus::InTransit);
    assert_eq!(snapshot[0].estimated_delivery, "June 12, 2025");
}
