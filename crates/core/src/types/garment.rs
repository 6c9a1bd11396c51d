//! Wardrobe garments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::{EntityId, Identified};

/// A single item in the wardrobe.
///
/// `image_url` is either a regular URL or an embedded data-URI; both are
/// treated as opaque text here. `date_added` has calendar-day granularity -
/// the store keeps a full timestamp, truncated at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garment {
    pub id: EntityId,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub color: String,
    pub image_url: String,
    pub date_added: NaiveDate,
}

impl Identified for Garment {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
