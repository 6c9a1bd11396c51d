//! Unified error type for coordinator operations.
//!
//! Nothing in this layer is fatal to the session: create failures roll the
//! optimistic entry back and surface here as recoverable diagnostics, delete
//! failures are logged and swallowed, and tracking failures never reach this
//! type at all - they are absorbed into the degraded path.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors surfaced by [`SyncCoordinator`](crate::SyncCoordinator) operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote store operation failed (transport, non-success status, or a
    /// response that did not match the expected row shape).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `SyncError`.
pub type Result<T> = std::result::Result<T, SyncError>;
