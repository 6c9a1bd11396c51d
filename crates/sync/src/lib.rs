//! Gated Sync - optimistic synchronization layer.
//!
//! Keeps the in-memory wardrobe, order, and release collections consistent
//! with the remote store under asynchronous, possibly-failing network
//! operations, and ingests live carrier tracking data with graceful
//! degradation.
//!
//! # Architecture
//!
//! - [`session`] - Explicit session-scoped store owning the three
//!   collections, guarded by an epoch token so resolutions arriving after
//!   sign-out are discarded
//! - [`coordinator`] - Optimistic create/delete: mutate locally first,
//!   confirm or roll back when the remote call resolves
//! - [`store`] - REST client for the remote row store plus the row↔entity
//!   conversion boundary
//! - [`tracking`] - Carrier-webhook ingestion pipeline with a simulated
//!   fallback when the endpoint is unconfigured or failing
//! - [`config`] / [`settings`] - Environment configuration and the local
//!   settings file holding the webhook endpoint
//!
//! This layer is a best-effort optimistic cache with rollback, not a
//! distributed consistency mechanism: no retries, no write-ahead log, no
//! offline conflict resolution.
//!
//! # Example
//!
//! ```rust,ignore
//! use gated_sync::{Session, SyncCoordinator, StoreClient, SyncConfig};
//!
//! let config = SyncConfig::from_env()?;
//! let session = Session::new(owner_id);
//! let coordinator = SyncCoordinator::new(session.clone(), StoreClient::new(&config.store));
//!
//! coordinator.load_all().await?;
//! let id = coordinator.create_garment(garment).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod reconcile;
pub mod session;
pub mod settings;
pub mod store;
pub mod tracking;

pub use config::{ConfigError, StoreConfig, SyncConfig};
pub use coordinator::SyncCoordinator;
pub use error::SyncError;
pub use session::{Collection, Session};
pub use settings::{Settings, SettingsError};
pub use store::{StoreClient, StoreError, WardrobeStore};
pub use tracking::{
    DegradeReason, FetchTracker, IngestOutcome, IngestSource, TrackingError, TrackingIngestor,
    TrackingRequest, WebhookClient,
};
