//! Session-scoped state.
//!
//! The three entity collections live in an explicit [`Session`] object
//! rather than ambient mutable state; only the
//! [`SyncCoordinator`](crate::SyncCoordinator) mutates them. Every mutation
//! is a closure applied under the write lock against the *current* vector,
//! so concurrent creates transform the latest state instead of a snapshot
//! captured before a sibling mutation.
//!
//! Each mutation also carries the epoch token captured when its operation
//! began. [`Session::sign_out`] bumps the epoch and clears the collections,
//! which turns any still-outstanding confirmation or rollback into a silent
//! discard instead of a write against a cleared session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use gated_core::{EntityId, Garment, Identified, Order, Release};
use uuid::Uuid;

/// An epoch-guarded, lock-protected entity collection.
///
/// Cheaply cloneable; clones share the same underlying vector and the
/// session's epoch counter. Locks are only held inside synchronous methods,
/// never across an await point.
#[derive(Clone)]
pub struct Collection<T> {
    epoch: Arc<AtomicU64>,
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Clone + Identified> Collection<T> {
    fn new(epoch: Arc<AtomicU64>) -> Self {
        Self {
            epoch,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Cloned snapshot of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entities currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entity with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|item| item.id() == id)
    }

    /// Apply `mutate` to the live vector if `token` still matches the
    /// session epoch. Returns whether the mutation was applied; a stale
    /// token (the session was torn down since the operation began) is
    /// discarded silently.
    pub fn apply(&self, token: u64, mutate: impl FnOnce(&mut Vec<T>)) -> bool {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        // Checked under the lock so sign_out cannot slip between the check
        // and the mutation.
        if self.epoch.load(Ordering::SeqCst) != token {
            return false;
        }
        mutate(&mut items);
        true
    }

    /// Replace the whole contents (initial hydration), epoch-guarded like
    /// any other mutation.
    pub fn replace(&self, token: u64, new_items: Vec<T>) -> bool {
        self.apply(token, |items| *items = new_items)
    }

    fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A signed-in user's session: owner identity, epoch counter, and the three
/// entity collections.
///
/// Cheaply cloneable via `Arc`; all clones observe the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    owner: Uuid,
    epoch: Arc<AtomicU64>,
    garments: Collection<Garment>,
    orders: Collection<Order>,
    releases: Collection<Release>,
}

impl Session {
    /// Create an empty session for the given owner.
    #[must_use]
    pub fn new(owner: Uuid) -> Self {
        let epoch = Arc::new(AtomicU64::new(0));
        Self {
            inner: Arc::new(SessionInner {
                owner,
                garments: Collection::new(Arc::clone(&epoch)),
                orders: Collection::new(Arc::clone(&epoch)),
                releases: Collection::new(Arc::clone(&epoch)),
                epoch,
            }),
        }
    }

    /// The owner this session belongs to.
    #[must_use]
    pub fn owner(&self) -> Uuid {
        self.inner.owner
    }

    /// Current epoch token. Operations capture this before their first
    /// suspension point and pass it back with every mutation.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// The wardrobe collection.
    #[must_use]
    pub fn garments(&self) -> &Collection<Garment> {
        &self.inner.garments
    }

    /// The tracked-order collection.
    #[must_use]
    pub fn orders(&self) -> &Collection<Order> {
        &self.inner.orders
    }

    /// The release-calendar collection.
    #[must_use]
    pub fn releases(&self) -> &Collection<Release> {
        &self.inner.releases
    }

    /// Tear the session down: advance the epoch, then clear all
    /// collections. In-flight network resolutions carrying the old token
    /// will be discarded when they try to apply.
    pub fn sign_out(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.garments.clear();
        self.inner.orders.clear();
        self.inner.releases.clear();
        tracing::debug!(owner = %self.inner.owner, "session signed out");
    }
}
