//! Entity identifiers.
//!
//! Every entity carries a string identifier. Before the remote store has
//! confirmed a write, the identifier is a client-minted *temporary* id; the
//! sync layer later swaps it for the server-assigned one in place. The
//! `tmp-` prefix makes the two regimes distinguishable without a separate
//! flag.

use serde::{Deserialize, Serialize};

/// Prefix shared by all client-minted identifiers.
const TEMP_PREFIX: &str = "tmp-";

/// String-backed identifier for any Gated entity.
///
/// Server ids arrive from the remote store (numeric or string columns, both
/// normalized to strings at the edge); temporary ids are minted locally via
/// [`EntityId::temporary`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id from an existing value (typically a server-assigned id).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh client-local identifier, valid only until the remote
    /// store confirms the entity.
    #[must_use]
    pub fn temporary() -> Self {
        Self(format!("{TEMP_PREFIX}{}", uuid::Uuid::new_v4().simple()))
    }

    /// Whether this id was minted locally and still awaits confirmation.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_PREFIX)
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Uniform id access for collection bookkeeping.
///
/// The sync layer reconciles and removes entries generically; every entity
/// family implements this.
pub trait Identified {
    /// The entity's current identifier (temporary or confirmed).
    fn id(&self) -> &EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporary_ids_are_flagged_and_unique() {
        let a = EntityId::temporary();
        let b = EntityId::temporary();
        assert!(a.is_temporary());
        assert!(b.is_temporary());
        assert_ne!(a, b);
    }

    #[test]
    fn server_ids_are_not_temporary() {
        let id = EntityId::new("1042");
        assert!(!id.is_temporary());
        assert_eq!(id.as_str(), "1042");
    }

    #[test]
    fn serde_is_transparent() {
        let id = EntityId::new("abc");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"abc\"");
    }
}
