//! Tracked shipment orders.

use serde::{Deserialize, Serialize};

use super::id::{EntityId, Identified};
use super::shipping::{Carrier, TrackingStatus};

/// Marker embedded in the history of orders built without live carrier data.
///
/// The UI flags such orders by inspecting the newest event's description;
/// [`Order::is_simulated`] is the typed accessor for the same signal.
pub const SIMULATION_MARKER: &str = "Simulated";

/// One line of a shipment's scan history.
///
/// All fields are display strings; the layer treats history entries as
/// opaque log lines for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub date: String,
    pub location: String,
    pub description: String,
}

/// A tracked package.
///
/// `history` is ordered newest-first and is never empty after creation - at
/// minimum one synthesized "label created" event exists.
/// `estimated_delivery` is a display value: a human-readable date or a
/// sentinel such as "Pending" or "Calculating...".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub tracking_number: String,
    pub carrier: Carrier,
    pub item_name: String,
    pub status: TrackingStatus,
    pub estimated_delivery: String,
    pub history: Vec<TrackingEvent>,
}

impl Order {
    /// Most recent scan event, if any.
    #[must_use]
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.history.first()
    }

    /// Whether this order was built from simulated data rather than a live
    /// carrier response.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.latest_event()
            .is_some_and(|event| event.description.contains(SIMULATION_MARKER))
    }
}

impl Identified for Order {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
