//! Remote-store row shapes.
//!
//! One struct per table, matching the persisted columns exactly. These are
//! the schema-validation boundary: a response body that does not
//! deserialize into these shapes is a parse failure, never partial data.
//! Enum-typed columns (`category`, `carrier`, `status`) reject unknown
//! values at this edge, and `id` columns are normalized to strings whether
//! the store returns them as JSON numbers or strings.

use chrono::{DateTime, Utc};
use gated_core::{Carrier, Category, TrackingEvent, TrackingStatus};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Accept a JSON number or string and normalize to `String`.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

// =============================================================================
// wardrobe_items
// =============================================================================

/// A row of the `wardrobe_items` table as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct GarmentRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub image_url: String,
    /// Timestamptz; truncated to a calendar date at the boundary.
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
    pub color: String,
    pub owner_id: Uuid,
}

/// The persisted-field subset written on insert (the store assigns `id`).
#[derive(Debug, Clone, Serialize)]
pub struct NewGarmentRow {
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub image_url: String,
    pub date_added: DateTime<Utc>,
    pub color: String,
    pub owner_id: Uuid,
}

// =============================================================================
// orders
// =============================================================================

/// A row of the `orders` table.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub tracking_number: String,
    pub carrier: Carrier,
    pub item_name: String,
    pub status: TrackingStatus,
    /// Null means no estimate; displays as the "Pending" sentinel.
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// JSON array column; events stored newest-first, as displayed.
    #[serde(default)]
    pub history: Vec<TrackingEvent>,
    pub owner_id: Uuid,
}

/// Insert shape for `orders`.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderRow {
    pub tracking_number: String,
    pub carrier: Carrier,
    pub item_name: String,
    pub status: TrackingStatus,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub history: Vec<TrackingEvent>,
    pub owner_id: Uuid,
}

// =============================================================================
// drops
// =============================================================================

/// A row of the `drops` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub brand: String,
    pub name: String,
    /// Split into a calendar date and a time-of-day string at the boundary.
    pub drop_datetime: DateTime<Utc>,
    pub image_url: String,
    pub notified: bool,
    #[serde(default)]
    pub url: Option<String>,
    pub owner_id: Uuid,
}

/// Insert shape for `drops`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReleaseRow {
    pub brand: String,
    pub name: String,
    pub drop_datetime: DateTime<Utc>,
    pub image_url: String,
    pub notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub owner_id: Uuid,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_is_normalized_to_string() {
        let json = r#"{
            "id": 123,
            "name": "Test Shirt",
            "brand": "Test Brand",
            "category": "Tops",
            "image_url": "http://example.com/img.png",
            "date_added": "2023-01-01T12:00:00Z",
            "color": "Blue",
            "owner_id": "4be0643f-1d98-573b-97cd-ca98a65347dd"
        }"#;

        let row: GarmentRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, "123");
    }

    #[test]
    fn string_id_passes_through() {
        let json = r#"{
            "id": "abc",
            "tracking_number": "12345",
            "carrier": "UPS",
            "item_name": "Sneakers",
            "status": "In Transit",
            "estimated_delivery": null,
            "history": [],
            "owner_id": "4be0643f-1d98-573b-97cd-ca98a65347dd"
        }"#;

        let row: OrderRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, "abc");
        assert!(row.estimated_delivery.is_none());
    }

    #[test]
    fn unknown_category_is_rejected_at_the_edge() {
        let json = r#"{
            "id": 1,
            "name": "Hat",
            "brand": "X",
            "category": "Headwear",
            "image_url": "img",
            "date_added": null,
            "color": "Black",
            "owner_id": "4be0643f-1d98-573b-97cd-ca98a65347dd"
        }"#;

        let result: Result<GarmentRow, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
