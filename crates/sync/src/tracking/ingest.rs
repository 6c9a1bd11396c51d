//! The per-request ingestion state machine.
//!
//! `Idle → Requesting → {Confirmed | Degraded} → Idle`. The ingestor holds
//! no per-request state between calls; each `ingest` runs the machine once
//! and returns to idle with a fully-formed order.

use tracing::{debug, warn};

use super::client::WebhookClient;
use super::normalize::{order_from_payload, simulated_order};
use super::{FetchTracker, TrackingError};
use crate::settings::Settings;
use gated_core::{Carrier, Order};

/// What the user supplies to start tracking a package.
#[derive(Debug, Clone)]
pub struct TrackingRequest {
    pub carrier: Carrier,
    pub tracking_number: String,
    pub item_name: String,
}

/// Why a request degraded to simulated data.
#[derive(Debug)]
pub enum DegradeReason {
    /// No webhook endpoint is configured.
    Unconfigured,
    /// The fetch was attempted and failed.
    Fetch(TrackingError),
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "no tracking endpoint configured"),
            Self::Fetch(e) => write!(f, "tracking fetch failed: {e}"),
        }
    }
}

/// Whether the produced order carries live or simulated data.
#[derive(Debug)]
pub enum IngestSource {
    /// Normalized from a live provider response.
    Confirmed,
    /// Built from simulated data; the reason feeds the one-time notice.
    Degraded(DegradeReason),
}

/// Terminal output of one run of the state machine: a fully-formed order
/// (temporary id already minted) plus where its data came from.
#[derive(Debug)]
pub struct IngestOutcome {
    pub order: Order,
    pub source: IngestSource,
}

impl IngestOutcome {
    /// Whether the order was built from simulated data.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.source, IngestSource::Degraded(_))
    }
}

/// Turns a tracking request into an order, degrading gracefully.
#[derive(Debug, Clone)]
pub struct TrackingIngestor<F = WebhookClient> {
    fetcher: Option<F>,
}

impl TrackingIngestor<WebhookClient> {
    /// Build an ingestor from the local settings; no configured endpoint
    /// means every request degrades.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.tracking_webhook() {
            Some(endpoint) => Self::new(WebhookClient::new(endpoint)),
            None => Self::unconfigured(),
        }
    }
}

impl<F: FetchTracker> TrackingIngestor<F> {
    /// Ingestor backed by a live fetcher.
    pub const fn new(fetcher: F) -> Self {
        Self {
            fetcher: Some(fetcher),
        }
    }

    /// Ingestor with no endpoint; always degrades.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { fetcher: None }
    }

    /// Whether a live endpoint is available.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Run the state machine once for `request`.
    ///
    /// Always produces an order: either confirmed live data or a simulated
    /// record whose newest event carries the simulation marker.
    pub async fn ingest(&self, request: &TrackingRequest) -> IngestOutcome {
        let Some(fetcher) = &self.fetcher else {
            debug!(
                tracking_number = %request.tracking_number,
                "no tracking endpoint configured; using simulated data"
            );
            return IngestOutcome {
                order: simulated_order(request),
                source: IngestSource::Degraded(DegradeReason::Unconfigured),
            };
        };

        debug!(
            carrier = %request.carrier,
            tracking_number = %request.tracking_number,
            "requesting live tracking data"
        );

        match fetcher.fetch(request.carrier, &request.tracking_number).await {
            Ok(payload) => {
                debug!(tracking_number = %request.tracking_number, "tracking confirmed");
                IngestOutcome {
                    order: order_from_payload(request, payload),
                    source: IngestSource::Confirmed,
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    tracking_number = %request.tracking_number,
                    "tracking fetch failed; degrading to simulated data"
                );
                IngestOutcome {
                    order: simulated_order(request),
                    source: IngestSource::Degraded(DegradeReason::Fetch(e)),
                }
            }
        }
    }
}
