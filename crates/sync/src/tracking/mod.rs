//! Carrier tracking ingestion.
//!
//! Given a carrier and tracking number, attempts one fetch against the
//! user-configured webhook endpoint and normalizes the provider's response
//! into a canonical [`Order`](gated_core::Order). Every failure mode -
//! unconfigured endpoint, transport error, non-success status, unexpected
//! body shape - degrades to a clearly-marked simulated record instead of a
//! hard failure, so the user always gets a working order card plus a
//! one-time transient notice.
//!
//! The integration is optional: with no endpoint configured the app works
//! normally on simulated data.

pub mod client;
pub mod ingest;
pub mod normalize;
pub mod payload;

pub use client::WebhookClient;
pub use ingest::{DegradeReason, IngestOutcome, IngestSource, TrackingIngestor, TrackingRequest};
pub use payload::{TrackerPayload, TrackingDetail, TrackingLocation};

use gated_core::Carrier;
use thiserror::Error;

/// Errors from the tracking fetch. Absorbed into the degraded path; never
/// fatal to the session.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body deviates from the expected provider shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam over the single-attempt webhook fetch, so flows can be exercised
/// without a network.
#[allow(async_fn_in_trait)]
pub trait FetchTracker {
    /// One POST to the configured endpoint; no retries.
    async fn fetch(
        &self,
        carrier: Carrier,
        tracking_number: &str,
    ) -> Result<TrackerPayload, TrackingError>;
}
