//! Remote row store: client, row shapes, and the conversion boundary.
//!
//! # Architecture
//!
//! - The store is a PostgREST-style REST API; one table per entity family
//!   (`wardrobe_items`, `orders`, `drops`)
//! - [`rows`] holds the persisted shapes and performs schema validation at
//!   the edge - business logic never sees an untyped payload
//! - [`convert`] maps rows to canonical entities and back
//! - [`WardrobeStore`] is the seam the coordinator is generic over; tests
//!   substitute in-memory fakes for [`StoreClient`]

pub mod client;
pub mod convert;
pub mod rows;

pub use client::StoreClient;
pub use rows::{GarmentRow, NewGarmentRow, NewOrderRow, NewReleaseRow, OrderRow, ReleaseRow};

use gated_core::EntityId;
use thiserror::Error;

/// Errors that can occur when interacting with the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected row shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Insert succeeded but the store returned no row representation.
    #[error("Insert returned no row")]
    MissingRow,
}

/// The remote-store seam.
///
/// Inserts return the server row (with the assigned id) so the coordinator
/// can reconcile; deletes are by id and idempotent on the store side.
#[allow(async_fn_in_trait)]
pub trait WardrobeStore {
    async fn list_garments(&self) -> Result<Vec<GarmentRow>, StoreError>;
    async fn insert_garment(&self, row: NewGarmentRow) -> Result<GarmentRow, StoreError>;
    async fn delete_garment(&self, id: &EntityId) -> Result<(), StoreError>;

    async fn list_orders(&self) -> Result<Vec<OrderRow>, StoreError>;
    async fn insert_order(&self, row: NewOrderRow) -> Result<OrderRow, StoreError>;
    async fn delete_order(&self, id: &EntityId) -> Result<(), StoreError>;

    async fn list_releases(&self) -> Result<Vec<ReleaseRow>, StoreError>;
    async fn insert_release(&self, row: NewReleaseRow) -> Result<ReleaseRow, StoreError>;
    async fn delete_release(&self, id: &EntityId) -> Result<(), StoreError>;
}
