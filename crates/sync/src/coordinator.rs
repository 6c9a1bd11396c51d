//! Optimistic create/delete orchestration.
//!
//! Every operation follows the same shape: mutate the collection
//! synchronously (the caller's next read already sees the change), then
//! await the remote call, then either reconcile the temporary id with the
//! server-confirmed entity or roll the optimistic entry back. The epoch
//! token captured before the first await makes late resolutions after
//! sign-out harmless.
//!
//! There is no update operation at this layer; entities are immutable once
//! created except for the internal identity swap.

use gated_core::{EntityId, Garment, Order, Release};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::reconcile::{reconcile, remove_by_id};
use crate::session::Session;
use crate::store::{WardrobeStore, convert};

/// Orchestrates optimistic mutations for the three session collections.
///
/// Generic over the store seam so flows can be exercised against in-memory
/// fakes; production wires in [`StoreClient`](crate::StoreClient).
#[derive(Clone)]
pub struct SyncCoordinator<S> {
    session: Session,
    store: S,
}

impl<S: WardrobeStore> SyncCoordinator<S> {
    /// Create a coordinator over a session and a store implementation.
    pub const fn new(session: Session, store: S) -> Self {
        Self { session, store }
    }

    /// The session whose collections this coordinator mutates.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Hydrate all three collections from the store, replacing their
    /// contents. Called once after sign-in.
    ///
    /// # Errors
    ///
    /// Returns the first store failure; collections already hydrated before
    /// the failure keep their fresh contents.
    pub async fn load_all(&self) -> Result<(), SyncError> {
        let token = self.session.epoch();

        let garments = self.store.list_garments().await?;
        self.session.garments().replace(
            token,
            garments.into_iter().map(convert::garment_from_row).collect(),
        );

        let orders = self.store.list_orders().await?;
        self.session.orders().replace(
            token,
            orders.into_iter().map(convert::order_from_row).collect(),
        );

        let releases = self.store.list_releases().await?;
        self.session.releases().replace(
            token,
            releases.into_iter().map(convert::release_from_row).collect(),
        );

        debug!(
            garments = self.session.garments().len(),
            orders = self.session.orders().len(),
            releases = self.session.releases().len(),
            "collections hydrated"
        );
        Ok(())
    }

    // =========================================================================
    // Garments
    // =========================================================================

    /// Optimistically add a garment and persist it.
    ///
    /// The garment must carry a locally unique temporary id and populated
    /// display fields (the form layer enforces this; it is not re-validated
    /// here). Returns the server-confirmed id.
    ///
    /// # Errors
    ///
    /// On a failed remote insert the optimistic entry is rolled back and
    /// the error surfaces as a recoverable diagnostic.
    pub async fn create_garment(&self, garment: Garment) -> Result<EntityId, SyncError> {
        let token = self.session.epoch();
        let temp_id = garment.id.clone();
        let row = convert::garment_to_row(&garment, self.session.owner());

        // Visible before the first suspension point.
        self.session
            .garments()
            .apply(token, |items| items.insert(0, garment));

        match self.store.insert_garment(row).await {
            Ok(confirmed_row) => {
                let confirmed = convert::garment_from_row(confirmed_row);
                let confirmed_id = confirmed.id.clone();
                let applied = self.session.garments().apply(token, |items| {
                    if !reconcile(items, &temp_id, confirmed) {
                        debug!(%temp_id, "garment vanished before confirmation; dropping it");
                    }
                });
                if !applied {
                    debug!(%temp_id, "garment confirmation arrived after sign-out; discarded");
                }
                Ok(confirmed_id)
            }
            Err(e) => {
                self.session.garments().apply(token, |items| {
                    remove_by_id(items, &temp_id);
                });
                warn!(error = %e, %temp_id, "garment insert failed; rolled back optimistic entry");
                Err(e.into())
            }
        }
    }

    /// Remove a garment locally, then best-effort delete it remotely.
    ///
    /// Idempotent from the caller's perspective: an absent id is a no-op
    /// and a failed remote delete never resurrects the local entity.
    pub async fn delete_garment(&self, id: &EntityId) {
        let token = self.session.epoch();
        self.session.garments().apply(token, |items| {
            remove_by_id(items, id);
        });

        if let Err(e) = self.store.delete_garment(id).await {
            warn!(error = %e, %id, "remote garment delete failed; local state unchanged");
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Optimistically add a tracked order and persist it. Same contract as
    /// [`Self::create_garment`]; the order typically comes out of the
    /// tracking ingestor with its temporary id already minted.
    ///
    /// # Errors
    ///
    /// On a failed remote insert the optimistic entry is rolled back and
    /// the error surfaces as a recoverable diagnostic.
    pub async fn create_order(&self, order: Order) -> Result<EntityId, SyncError> {
        let token = self.session.epoch();
        let temp_id = order.id.clone();
        let row = convert::order_to_row(&order, self.session.owner());

        self.session
            .orders()
            .apply(token, |items| items.insert(0, order));

        match self.store.insert_order(row).await {
            Ok(confirmed_row) => {
                let confirmed = convert::order_from_row(confirmed_row);
                let confirmed_id = confirmed.id.clone();
                let applied = self.session.orders().apply(token, |items| {
                    if !reconcile(items, &temp_id, confirmed) {
                        debug!(%temp_id, "order vanished before confirmation; dropping it");
                    }
                });
                if !applied {
                    debug!(%temp_id, "order confirmation arrived after sign-out; discarded");
                }
                Ok(confirmed_id)
            }
            Err(e) => {
                self.session.orders().apply(token, |items| {
                    remove_by_id(items, &temp_id);
                });
                warn!(error = %e, %temp_id, "order insert failed; rolled back optimistic entry");
                Err(e.into())
            }
        }
    }

    /// Remove an order locally, then best-effort delete it remotely.
    pub async fn delete_order(&self, id: &EntityId) {
        let token = self.session.epoch();
        self.session.orders().apply(token, |items| {
            remove_by_id(items, id);
        });

        if let Err(e) = self.store.delete_order(id).await {
            warn!(error = %e, %id, "remote order delete failed; local state unchanged");
        }
    }

    // =========================================================================
    // Releases
    // =========================================================================

    /// Optimistically add a release and persist it. Same contract as
    /// [`Self::create_garment`].
    ///
    /// # Errors
    ///
    /// On a failed remote insert the optimistic entry is rolled back and
    /// the error surfaces as a recoverable diagnostic.
    pub async fn create_release(&self, release: Release) -> Result<EntityId, SyncError> {
        let token = self.session.epoch();
        let temp_id = release.id.clone();
        let row = convert::release_to_row(&release, self.session.owner());

        self.session
            .releases()
            .apply(token, |items| items.insert(0, release));

        match self.store.insert_release(row).await {
            Ok(confirmed_row) => {
                let confirmed = convert::release_from_row(confirmed_row);
                let confirmed_id = confirmed.id.clone();
                let applied = self.session.releases().apply(token, |items| {
                    if !reconcile(items, &temp_id, confirmed) {
                        debug!(%temp_id, "release vanished before confirmation; dropping it");
                    }
                });
                if !applied {
                    debug!(%temp_id, "release confirmation arrived after sign-out; discarded");
                }
                Ok(confirmed_id)
            }
            Err(e) => {
                self.session.releases().apply(token, |items| {
                    remove_by_id(items, &temp_id);
                });
                warn!(error = %e, %temp_id, "release insert failed; rolled back optimistic entry");
                Err(e.into())
            }
        }
    }

    /// Remove a release locally, then best-effort delete it remotely.
    pub async fn delete_release(&self, id: &EntityId) {
        let token = self.session.epoch();
        self.session.releases().apply(token, |items| {
            remove_by_id(items, id);
        });

        if let Err(e) = self.store.delete_release(id).await {
            warn!(error = %e, %id, "remote release delete failed; local state unchanged");
        }
    }
}
