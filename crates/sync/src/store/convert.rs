//! Row ↔ entity conversions.
//!
//! Pure functions between the store's persisted shapes and the canonical
//! in-memory entities. Reads truncate or format timestamps into the display
//! values the entities carry; writes invert that projection for the fields
//! that survive it (sentinels and unparseable display values map to null).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use gated_core::{EntityId, Garment, Order, Release};
use uuid::Uuid;

use super::rows::{
    GarmentRow, NewGarmentRow, NewOrderRow, NewReleaseRow, OrderRow, ReleaseRow,
};

/// Display sentinel for orders without a delivery estimate.
pub const PENDING_SENTINEL: &str = "Pending";

/// Human-readable date format used for display values ("June 12, 2025").
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Time-of-day format for release drops ("10:00 AM UTC").
const TIME_OF_DAY_FORMAT: &str = "%-I:%M %p UTC";

// =============================================================================
// Garments
// =============================================================================

pub fn garment_from_row(row: GarmentRow) -> Garment {
    Garment {
        id: EntityId::new(row.id),
        name: row.name,
        brand: row.brand,
        category: row.category,
        color: row.color,
        image_url: row.image_url,
        // Timestamptz truncated to calendar-day granularity; a null column
        // defaults to today.
        date_added: row
            .date_added
            .map_or_else(|| Utc::now().date_naive(), |ts| ts.date_naive()),
    }
}

pub fn garment_to_row(garment: &Garment, owner: Uuid) -> NewGarmentRow {
    NewGarmentRow {
        name: garment.name.clone(),
        brand: garment.brand.clone(),
        category: garment.category,
        image_url: garment.image_url.clone(),
        date_added: garment.date_added.and_time(NaiveTime::MIN).and_utc(),
        color: garment.color.clone(),
        owner_id: owner,
    }
}

// =============================================================================
// Orders
// =============================================================================

pub fn order_from_row(row: OrderRow) -> Order {
    Order {
        id: EntityId::new(row.id),
        tracking_number: row.tracking_number,
        carrier: row.carrier,
        item_name: row.item_name,
        status: row.status,
        estimated_delivery: row
            .estimated_delivery
            .map_or_else(|| PENDING_SENTINEL.to_owned(), format_display_date),
        history: row.history,
    }
}

pub fn order_to_row(order: &Order, owner: Uuid) -> NewOrderRow {
    NewOrderRow {
        tracking_number: order.tracking_number.clone(),
        carrier: order.carrier,
        item_name: order.item_name.clone(),
        status: order.status,
        estimated_delivery: parse_estimated_delivery(&order.estimated_delivery),
        history: order.history.clone(),
        owner_id: owner,
    }
}

// =============================================================================
// Releases
// =============================================================================

pub fn release_from_row(row: ReleaseRow) -> Release {
    Release {
        id: EntityId::new(row.id),
        brand: row.brand,
        name: row.name,
        // One timestamptz column, split into the date and time-of-day
        // display pair the entity carries.
        date: row.drop_datetime.date_naive(),
        time: row.drop_datetime.format(TIME_OF_DAY_FORMAT).to_string(),
        image_url: row.image_url,
        notified: row.notified,
        url: row.url,
    }
}

pub fn release_to_row(release: &Release, owner: Uuid) -> NewReleaseRow {
    let time_of_day = parse_time_of_day(&release.time).unwrap_or(NaiveTime::MIN);
    NewReleaseRow {
        brand: release.brand.clone(),
        name: release.name.clone(),
        drop_datetime: release.date.and_time(time_of_day).and_utc(),
        image_url: release.image_url.clone(),
        notified: release.notified,
        url: release.url.clone(),
        owner_id: owner,
    }
}

// =============================================================================
// Display formatting helpers
// =============================================================================

/// Format a timestamp as a human-readable date ("June 12, 2025").
pub fn format_display_date(ts: DateTime<Utc>) -> String {
    ts.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Invert the estimated-delivery display value. Sentinels and anything this
/// layer did not itself format map to `None`.
fn parse_estimated_delivery(display: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(display) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(display, DISPLAY_DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a release's time-of-day display string back to the clock time.
fn parse_time_of_day(display: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(display.trim_end_matches(" UTC"), "%I:%M %p").ok()
}
