//! Garment categories.

use serde::{Deserialize, Serialize};

/// Fixed set of wardrobe categories.
///
/// The serialized form matches the display words used by the remote store's
/// `category` column, so an unrecognized value is rejected at the
/// deserialization boundary rather than leaking into the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Tops,
    Bottoms,
    Outerwear,
    Shoes,
    Accessories,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Tops,
        Self::Bottoms,
        Self::Outerwear,
        Self::Shoes,
        Self::Accessories,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Tops => "Tops",
            Self::Bottoms => "Bottoms",
            Self::Outerwear => "Outerwear",
            Self::Shoes => "Shoes",
            Self::Accessories => "Accessories",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tops" => Ok(Self::Tops),
            "Bottoms" => Ok(Self::Bottoms),
            "Outerwear" => Ok(Self::Outerwear),
            "Shoes" => Ok(Self::Shoes),
            "Accessories" => Ok(Self::Accessories),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
