use crate::cart_store::CartStore;
use crate::model::{AppUser, CartLineItem, CartState};
use crate::services::{CartId, RemoteCartService, ServiceError};
use state_framework::ObserverHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Where cart mutations are being recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMode {
    /// Only the local store and its durable slot.
    Local,
    /// Forwarded to the user's remote cart, then mirrored locally.
    Remote { user_id: String, cart_id: CartId },
}

/// Binds a [`CartStore`] to a remote cart while a user is signed in.
///
/// Signed out, every call goes straight to the local store and the store mirrors the
/// guest cart to its slot. Signed in, mutations go to the remote cart first and are
/// then applied to the local store, so views subscribed to the store keep seeing every
/// change. Remote failures are logged and never block the local mutation. The slot is
/// not written while signed in.
///
/// # Sign-in migration
///
/// On [`sign_in`](Self::sign_in) the remote cart wins if it already has items, and the
/// guest slot is left alone. If the remote cart is empty and the guest cart is not, the
/// guest lines are pushed to the remote cart, the remote snapshot is installed locally,
/// and the guest slot is erased.
///
/// On [`sign_out`](Self::sign_out) the local cart is reloaded from the guest slot.
pub struct CartSession {
    store: CartStore,
    remote: Arc<dyn RemoteCartService>,
    mode: RwLock<CartMode>,
}

/// What a successful remote attach found.
struct Attached {
    cart_id: CartId,
    snapshot: Vec<CartLineItem>,
    migrated: bool,
}

impl CartSession {
    pub fn new(store: CartStore, remote: Arc<dyn RemoteCartService>) -> Self {
        Self {
            store,
            remote,
            mode: RwLock::new(CartMode::Local),
        }
    }

    /// The local store, for reads and subscriptions.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn state(&self) -> CartState {
        self.store.state()
    }

    pub fn subscribe(&self, observer: ObserverHandle<CartState>) {
        self.store.subscribe(observer);
    }

    pub fn unsubscribe(&self, observer: &ObserverHandle<CartState>) {
        self.store.unsubscribe(observer);
    }

    pub async fn mode(&self) -> CartMode {
        self.mode.read().await.clone()
    }

    async fn remote_cart(&self) -> Option<CartId> {
        match &*self.mode.read().await {
            CartMode::Remote { cart_id, .. } => Some(*cart_id),
            CartMode::Local => None,
        }
    }

    // =========================================================================
    // Sign in / out
    // =========================================================================

    /// Switches to the user's remote cart, migrating the guest cart if needed.
    ///
    /// A session already bound to someone is unbound first, so only the guest cart can
    /// be migrated. Returns the resulting mode. If the remote cart cannot be reached the
    /// session stays [`CartMode::Local`] and the guest cart is left untouched.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn sign_in(&self, user: &AppUser) -> CartMode {
        let mut mode = self.mode.write().await;
        if matches!(*mode, CartMode::Remote { .. }) {
            self.restore_guest_cart();
            *mode = CartMode::Local;
        }

        match self.attach_remote(user).await {
            Ok(attached) => {
                self.store.set_persistence(false);
                if attached.migrated {
                    self.store.forget_persisted();
                }
                self.store.replace_items(attached.snapshot);

                *mode = CartMode::Remote {
                    user_id: user.id.clone(),
                    cart_id: attached.cart_id,
                };
                info!(cart_id = %attached.cart_id, migrated = attached.migrated, "Cart bound to remote");
                mode.clone()
            }
            Err(e) => {
                warn!(error = %e, "Remote cart unavailable, staying local");
                CartMode::Local
            }
        }
    }

    /// Talks to the remote side only; the local store is changed by the caller once
    /// everything succeeded.
    async fn attach_remote(&self, user: &AppUser) -> Result<Attached, ServiceError> {
        let cart_id = self.remote.get_or_create_cart(&user.id).await?;
        let remote_items = self.remote.cart_items(&cart_id).await?;

        if !remote_items.is_empty() {
            return Ok(Attached {
                cart_id,
                snapshot: remote_items,
                migrated: false,
            });
        }

        let guest_items = self.store.items();
        if guest_items.is_empty() {
            return Ok(Attached {
                cart_id,
                snapshot: Vec::new(),
                migrated: false,
            });
        }

        info!(count = guest_items.len(), "Migrating guest cart");
        for item in guest_items {
            self.remote.add_item(&cart_id, item).await?;
        }
        Ok(Attached {
            cart_id,
            snapshot: self.remote.cart_items(&cart_id).await?,
            migrated: true,
        })
    }

    /// Drops the remote binding and brings back the guest cart from the slot.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        let mut mode = self.mode.write().await;
        if matches!(*mode, CartMode::Remote { .. }) {
            self.restore_guest_cart();
        }
        *mode = CartMode::Local;
        info!("Cart unbound from remote");
    }

    fn restore_guest_cart(&self) {
        self.store.set_persistence(true);
        self.store.reload();
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    #[instrument(skip(self, item), fields(line_id = %item.id))]
    pub async fn add_item(&self, item: CartLineItem) {
        if let Some(cart_id) = self.remote_cart().await {
            if let Err(e) = self.remote.add_item(&cart_id, item.clone()).await {
                warn!(error = %e, "Remote add failed");
            }
        }
        self.store.add_item(item);
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: &str) {
        if let Some(cart_id) = self.remote_cart().await {
            if let Err(e) = self.remote.remove_item(&cart_id, id).await {
                warn!(error = %e, "Remote remove failed");
            }
        }
        self.store.remove_item(id);
    }

    /// Sets a line's quantity; zero removes the line on both sides.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: &str, quantity: u32) {
        if let Some(cart_id) = self.remote_cart().await {
            if let Err(e) = self.remote.update_quantity(&cart_id, id, quantity).await {
                warn!(error = %e, "Remote quantity update failed");
            }
        }
        self.store.update_quantity(id, quantity);
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self) {
        if let Some(cart_id) = self.remote_cart().await {
            if let Err(e) = self.remote.clear(&cart_id).await {
                warn!(error = %e, "Remote clear failed");
            }
        }
        self.store.clear_cart();
    }
}
