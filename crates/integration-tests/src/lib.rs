//! Integration tests for Gated.
//!
//! The sync layer is generic over its two network seams
//! ([`WardrobeStore`](gated_sync::WardrobeStore) and
//! [`FetchTracker`](gated_sync::FetchTracker)), so these tests drive the
//! real coordinator and ingestor against the in-memory fakes below - no
//! server required. The fakes can fail on command and can hold inserts at
//! a gate so tests can interleave work with an in-flight confirmation.
//!
//! # Test Categories
//!
//! - `sync_flow` - Optimistic create/delete, rollback, identity
//!   reconciliation, and session teardown
//! - `tracking_flow` - Tracking ingestion, degradation, and the
//!   ingest-then-persist path

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use gated_core::{Carrier, EntityId};
use gated_sync::store::{
    GarmentRow, NewGarmentRow, NewOrderRow, NewReleaseRow, OrderRow, ReleaseRow,
};
use gated_sync::tracking::TrackerPayload;
use gated_sync::{FetchTracker, StoreError, TrackingError, WardrobeStore};
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Owner id shared by all fixtures.
#[must_use]
pub fn test_owner() -> Uuid {
    Uuid::nil()
}

#[derive(Default)]
struct FakeStoreState {
    garments: Vec<GarmentRow>,
    orders: Vec<OrderRow>,
    releases: Vec<ReleaseRow>,
    deleted: Vec<String>,
    fail_inserts: bool,
    fail_deletes: bool,
}

/// In-memory [`WardrobeStore`].
///
/// Inserts assign sequential numeric ids (echoing the store's bigserial
/// columns) and return the confirmed row. With a gate installed, each
/// insert parks until the test releases a permit, which lets the test act
/// while a confirmation is still in flight.
#[derive(Clone)]
pub struct FakeStore {
    state: Arc<Mutex<FakeStoreState>>,
    next_id: Arc<AtomicI64>,
    insert_gate: Option<Arc<Semaphore>>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeStoreState::default())),
            next_id: Arc::new(AtomicI64::new(1)),
            insert_gate: None,
        }
    }

    /// A store whose inserts block until the returned semaphore hands out
    /// a permit.
    #[must_use]
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut store = Self::new();
        store.insert_gate = Some(Arc::clone(&gate));
        (store, gate)
    }

    /// Make every subsequent insert fail with a server error.
    pub fn fail_inserts(&self) {
        self.lock().fail_inserts = true;
    }

    /// Make every subsequent delete fail with a server error.
    pub fn fail_deletes(&self) {
        self.lock().fail_deletes = true;
    }

    /// Seed a row that `list_garments` will return.
    pub fn seed_garment(&self, row: GarmentRow) {
        self.lock().garments.push(row);
    }

    /// Seed a row that `list_orders` will return.
    pub fn seed_order(&self, row: OrderRow) {
        self.lock().orders.push(row);
    }

    /// Seed a row that `list_releases` will return.
    pub fn seed_release(&self, row: ReleaseRow) {
        self.lock().releases.push(row);
    }

    /// Ids of every delete that reached the store, in order.
    #[must_use]
    pub fn deleted_ids(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeStoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn server_error() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "internal error".to_owned(),
        }
    }

    async fn pass_gate(&self) {
        let Some(gate) = &self.insert_gate else {
            return;
        };
        if let Ok(permit) = gate.acquire().await {
            permit.forget();
        }
    }

    fn assign_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

impl WardrobeStore for FakeStore {
    async fn list_garments(&self) -> Result<Vec<GarmentRow>, StoreError> {
        Ok(self.lock().garments.clone())
    }

    async fn insert_garment(&self, row: NewGarmentRow) -> Result<GarmentRow, StoreError> {
        self.pass_gate().await;
        if self.lock().fail_inserts {
            return Err(Self::server_error());
        }
        Ok(GarmentRow {
            id: self.assign_id(),
            name: row.name,
            brand: row.brand,
            category: row.category,
            image_url: row.image_url,
            date_added: Some(row.date_added),
            color: row.color,
            owner_id: row.owner_id,
        })
    }

    async fn delete_garment(&self, id: &EntityId) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.fail_deletes {
            return Err(Self::server_error());
        }
        state.deleted.push(id.as_str().to_owned());
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<OrderRow>, StoreError> {
        Ok(self.lock().orders.clone())
    }

    async fn insert_order(&self, row: NewOrderRow) -> Result<OrderRow, StoreError> {
        self.pass_gate().await;
        if self.lock().fail_inserts {
            return Err(Self::server_error());
        }
        Ok(OrderRow {
            id: self.assign_id(),
            tracking_number: row.tracking_number,
            carrier: row.carrier,
            item_name: row.item_name,
            status: row.status,
            estimated_delivery: row.estimated_delivery,
            history: row.history,
            owner_id: row.owner_id,
        })
    }

    async fn delete_order(&self, id: &EntityId) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.fail_deletes {
            return Err(Self::server_error());
        }
        state.deleted.push(id.as_str().to_owned());
        Ok(())
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseRow>, StoreError> {
        Ok(self.lock().releases.clone())
    }

    async fn insert_release(&self, row: NewReleaseRow) -> Result<ReleaseRow, StoreError> {
        self.pass_gate().await;
        if self.lock().fail_inserts {
            return Err(Self::server_error());
        }
        Ok(ReleaseRow {
            id: self.assign_id(),
            brand: row.brand,
            name: row.name,
            drop_datetime: row.drop_datetime,
            image_url: row.image_url,
            notified: row.notified,
            url: row.url,
            owner_id: row.owner_id,
        })
    }

    async fn delete_release(&self, id: &EntityId) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.fail_deletes {
            return Err(Self::server_error());
        }
        state.deleted.push(id.as_str().to_owned());
        Ok(())
    }
}

/// In-memory [`FetchTracker`] returning a canned response.
///
/// `Ok` bodies go through real deserialization, so a malformed body
/// surfaces exactly like one from a live endpoint.
pub struct FakeTracker {
    response: Result<String, u16>,
}

impl FakeTracker {
    /// Tracker that answers every fetch with `body`.
    #[must_use]
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(body.to_owned()),
        }
    }

    /// Tracker that answers every fetch with an HTTP error status.
    #[must_use]
    pub const fn failing_with(status: u16) -> Self {
        Self {
            response: Err(status),
        }
    }
}

impl FetchTracker for FakeTracker {
    async fn fetch(
        &self,
        _carrier: Carrier,
        _tracking_number: &str,
    ) -> Result<TrackerPayload, TrackingError> {
        match &self.response {
            Ok(body) => serde_json::from_str(body).map_err(TrackingError::Parse),
            Err(status) => Err(TrackingError::Api {
                status: *status,
                message: "upstream failure".to_owned(),
            }),
        }
    }
}

/// A garment row as the store would return it from a list.
#[must_use]
pub fn seeded_garment_row(id: &str, name: &str) -> GarmentRow {
    GarmentRow {
        id: id.to_owned(),
        name: name.to_owned(),
        brand: "Acme".to_owned(),
        category: gated_core::Category::Tops,
        image_url: "https://example.com/img.png".to_owned(),
        date_added: "2025-06-01T14:30:00Z".parse().ok(),
        color: "Black".to_owned(),
        owner_id: test_owner(),
    }
}
