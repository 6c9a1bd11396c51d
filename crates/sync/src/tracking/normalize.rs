//! Normalization of provider payloads into canonical orders.
//!
//! Pure functions: status vocabulary mapping, event-list reversal so the
//! newest scan comes first, placeholder synthesis when the provider sends
//! no events, and the simulated-record builder used by every degraded path.

use chrono::{DateTime, Utc};
use gated_core::{EntityId, Order, TrackingEvent, TrackingStatus};

use super::ingest::TrackingRequest;
use super::payload::{TrackerPayload, TrackingDetail};

/// Display format for scan timestamps ("June 10, 8:00 AM").
const EVENT_DATETIME_FORMAT: &str = "%B %-d, %-I:%M %p";

/// Display format for dates without a clock component.
const EVENT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Map the provider's status vocabulary onto the internal enumeration.
/// Unrecognized values default to `PreTransit`.
#[must_use]
pub fn map_provider_status(provider_status: &str) -> TrackingStatus {
    match provider_status.to_lowercase().as_str() {
        "delivered" => TrackingStatus::Delivered,
        "out_for_delivery" => TrackingStatus::OutForDelivery,
        "in_transit" => TrackingStatus::InTransit,
        _ => TrackingStatus::PreTransit,
    }
}

/// Build a confirmed order from a provider payload. The order carries a
/// fresh temporary id, ready for the coordinator's create path.
#[must_use]
pub fn order_from_payload(request: &TrackingRequest, payload: TrackerPayload) -> Order {
    let mut history: Vec<TrackingEvent> = payload
        .tracking_details
        .into_iter()
        .map(event_from_detail)
        .collect();
    // Providers send oldest-first; display wants the most recent on top.
    history.reverse();

    if history.is_empty() {
        history.push(TrackingEvent {
            date: Utc::now().format(EVENT_DATE_FORMAT).to_string(),
            location: "N/A".to_owned(),
            description: "Tracking info received (No History)".to_owned(),
        });
    }

    Order {
        id: EntityId::temporary(),
        tracking_number: request.tracking_number.clone(),
        carrier: request.carrier,
        item_name: request.item_name.clone(),
        status: map_provider_status(&payload.status),
        estimated_delivery: payload
            .est_delivery_date
            .unwrap_or_else(|| "Unknown".to_owned()),
        history,
    }
}

/// Build the simulated order used whenever live data is unavailable. The
/// single history event carries the simulation marker in its description.
#[must_use]
pub fn simulated_order(request: &TrackingRequest) -> Order {
    Order {
        id: EntityId::temporary(),
        tracking_number: request.tracking_number.clone(),
        carrier: request.carrier,
        item_name: request.item_name.clone(),
        status: TrackingStatus::PreTransit,
        estimated_delivery: "Calculating...".to_owned(),
        history: vec![TrackingEvent {
            date: Utc::now().format(EVENT_DATE_FORMAT).to_string(),
            location: "Origin Scan".to_owned(),
            description: "Label Created (Simulated)".to_owned(),
        }],
    }
}

fn event_from_detail(detail: TrackingDetail) -> TrackingEvent {
    let location = detail
        .tracking_location
        .and_then(|loc| {
            loc.city.map(|city| match loc.state {
                Some(state) => format!("{city}, {state}"),
                None => city,
            })
        })
        .unwrap_or_else(|| "Processing Center".to_owned());

    TrackingEvent {
        date: format_event_datetime(&detail.datetime),
        location,
        description: detail
            .message
            .or(detail.status)
            .unwrap_or_else(|| "Status update".to_owned()),
    }
}

/// Reformat a provider timestamp for display; anything that is not RFC 3339
/// is kept verbatim rather than dropped.
fn format_event_datetime(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_owned(),
        |ts| {
            ts.with_timezone(&Utc)
                .format(EVENT_DATETIME_FORMAT)
                .to_string()
        },
    )
}
