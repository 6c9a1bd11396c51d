//! Product releases ("drops").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{EntityId, Identified};

/// An upcoming product release.
///
/// Named `Release` rather than `Drop` to stay clear of the prelude trait.
/// `time` is a display string with the timezone baked into the text; the
/// remote store keeps the authoritative instant and the boundary splits it
/// into `date` + `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: EntityId,
    pub brand: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    pub image_url: String,
    pub notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Identified for Release {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
