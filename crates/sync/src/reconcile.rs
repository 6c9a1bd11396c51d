//! Identity reconciliation.
//!
//! When a remote insert confirms, the temporary-id entry is replaced in
//! place with the server-confirmed entity. The core race-safety contract
//! lives here: if the entry vanished while the call was outstanding (the
//! user deleted it), the confirmation loses - it is never re-inserted.

use gated_core::{EntityId, Identified};

/// Replace the entry whose id equals `temp_id` with `confirmed`, preserving
/// its position. Returns whether a swap happened; a missing target is a
/// defined no-op, not an error.
pub fn reconcile<T: Identified>(items: &mut [T], temp_id: &EntityId, confirmed: T) -> bool {
    match items.iter_mut().find(|item| item.id() == temp_id) {
        Some(slot) => {
            *slot = confirmed;
            true
        }
        None => false,
    }
}

/// Remove the entry with the given id, if present. Returns whether anything
/// was removed; absent ids are a no-op.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &EntityId) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        id: EntityId,
        label: &'static str,
    }

    impl Identified for Entry {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn entry(id: &str, label: &'static str) -> Entry {
        Entry {
            id: EntityId::new(id),
            label,
        }
    }

    #[test]
    fn swap_preserves_position_and_neighbors() {
        let mut items = vec![entry("a", "first"), entry("tmp-x", "pending"), entry("c", "third")];

        let swapped = reconcile(
            &mut items,
            &EntityId::new("tmp-x"),
            entry("42", "confirmed"),
        );

        assert!(swapped);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].id, EntityId::new("42"));
        assert_eq!(items[1].label, "confirmed");
        assert_eq!(items[0].label, "first");
        assert_eq!(items[2].label, "third");
    }

    #[test]
    fn missing_target_is_a_no_op_and_never_reinserts() {
        let mut items = vec![entry("a", "first")];

        let swapped = reconcile(
            &mut items,
            &EntityId::new("tmp-gone"),
            entry("42", "confirmed"),
        );

        assert!(!swapped);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, EntityId::new("a"));
    }

    #[test]
    fn double_reconcile_is_idempotent() {
        let mut items = vec![entry("tmp-x", "pending")];
        let temp_id = EntityId::new("tmp-x");

        reconcile(&mut items, &temp_id, entry("42", "confirmed"));
        // Second confirmation for the same temp id finds nothing: exactly
        // one entry with the confirmed id remains.
        reconcile(&mut items, &temp_id, entry("42", "confirmed"));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, EntityId::new("42"));
    }

    #[test]
    fn remove_absent_id_is_a_no_op() {
        let mut items = vec![entry("a", "first")];
        assert!(!remove_by_id(&mut items, &EntityId::new("b")));
        assert_eq!(items.len(), 1);
    }
}
