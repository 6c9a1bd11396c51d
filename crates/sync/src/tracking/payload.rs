//! Provider response shapes for the carrier webhook.
//!
//! The endpoint is expected to relay an EasyPost-style tracker object. These
//! structs are the validation boundary: a body that does not deserialize is
//! treated as a failed fetch, not partial data.

use serde::Deserialize;

/// Top-level tracker object.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerPayload {
    /// Provider status vocabulary ("in_transit", "delivered", ...).
    pub status: String,
    /// Estimated delivery, adopted verbatim when present.
    #[serde(default, alias = "estimated_delivery_date")]
    pub est_delivery_date: Option<String>,
    /// Scan events in the provider's order (oldest first).
    #[serde(default)]
    pub tracking_details: Vec<TrackingDetail>,
}

/// One provider scan event.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingDetail {
    /// RFC 3339 timestamp of the scan.
    pub datetime: String,
    #[serde(default)]
    pub tracking_location: Option<TrackingLocation>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Scan location; any field may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}
