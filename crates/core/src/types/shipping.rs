//! Shipping enums: carriers and tracking statuses.

use serde::{Deserialize, Serialize};

/// Supported parcel carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Carrier {
    #[serde(rename = "USPS")]
    Usps,
    #[default]
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "FedEx")]
    FedEx,
}

impl Carrier {
    /// All carriers, in display order.
    pub const ALL: [Self; 3] = [Self::Usps, Self::Ups, Self::FedEx];
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Usps => "USPS",
            Self::Ups => "UPS",
            Self::FedEx => "FedEx",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USPS" => Ok(Self::Usps),
            "UPS" => Ok(Self::Ups),
            "FedEx" => Ok(Self::FedEx),
            _ => Err(format!("invalid carrier: {s}")),
        }
    }
}

/// Parcel tracking status.
///
/// Variant order follows real-world progression; `Ord` reflects that order
/// but nothing enforces monotonic transitions - carriers do report
/// regressions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TrackingStatus {
    #[default]
    #[serde(rename = "Pre-Transit")]
    PreTransit,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PreTransit => "Pre-Transit",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_serializes_to_display_form() {
        let json = serde_json::to_string(&Carrier::FedEx).expect("serialize");
        assert_eq!(json, "\"FedEx\"");
    }

    #[test]
    fn status_serializes_to_display_form() {
        let json = serde_json::to_string(&TrackingStatus::OutForDelivery).expect("serialize");
        assert_eq!(json, "\"Out for Delivery\"");
    }

    #[test]
    fn status_order_follows_progression() {
        assert!(TrackingStatus::PreTransit < TrackingStatus::InTransit);
        assert!(TrackingStatus::InTransit < TrackingStatus::OutForDelivery);
        assert!(TrackingStatus::OutForDelivery < TrackingStatus::Delivered);
    }
}
