//! # Cart Store
//!
//! The authoritative cart for one session.
//!
//! ## Overview
//!
//! [`CartStore`] owns a [`Subject<CartState>`] and a durable slot. Every mutation
//! rebuilds the whole [`CartState`] from the item list, publishes it to the attached
//! observers, and then mirrors the item list into the slot:
//!
//! ```text
//! mutate items ──► CartState::from_items ──► subject.set_state (notify) ──► slot write
//! ```
//!
//! Each mutating call produces exactly one notification followed by exactly one slot
//! write (or erase, for [`CartStore::clear_cart`]). Slot failures are logged and do not
//! fail the mutation; the in-memory cart stays authoritative.
//!
//! ## Structure
//!
//! - [`persistence`] - Load/store helpers for the JSON item list
//!
//! ## Usage
//!
//! ```rust
//! use coffee_shop::cart_store::CartStore;
//! use coffee_shop::model::{CartLineItem, CartState};
//! use rust_decimal::Decimal;
//! use state_framework::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = CartStore::open(Arc::new(MemoryStore::new()));
//! store.subscribe(Arc::new(|state: &CartState| {
//!     println!("{} items, subtotal {}", state.item_count, state.subtotal);
//! }));
//!
//! store.add_item(CartLineItem {
//!     id: "latte-1-medium-".to_string(),
//!     name: "Latte".to_string(),
//!     price: Decimal::new(500, 2),
//!     image: String::new(),
//!     quantity: 2,
//!     size: "Medium (16oz)".to_string(),
//!     options: vec![],
//! });
//!
//! assert_eq!(store.subtotal(), Decimal::new(1000, 2));
//! ```
//!
//! ## Concurrency
//!
//! Each mutation reads and rewrites the item list under the subject's lock, so two
//! callers mutating at once never lose each other's change. Their slot writes happen
//! after the lock is released and may land in either order; the slot is last-write-wins.
//!
//! Observers run synchronously inside the mutating call. An observer that mutates the
//! store from its callback triggers a nested notification before the outer call has
//! written the slot; the outer write then overwrites the inner one.
//!
//! ## Mirroring
//!
//! Mirroring can be switched off with [`CartStore::set_persistence`]. The cart session
//! does this while the cart belongs to a signed-in user, so the slot only ever holds
//! the guest cart.

pub mod persistence;

use crate::model::{merge_line_item, CartLineItem, CartState};
use rust_decimal::Decimal;
use state_framework::{KeyValueStore, ObserverHandle, Subject};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Default slot key for the local cart mirror.
pub const CART_STORAGE_KEY: &str = "cart";

pub struct CartStore {
    subject: Subject<CartState>,
    slot: Arc<dyn KeyValueStore>,
    key: String,
    persist: AtomicBool,
}

impl CartStore {
    /// Opens the store on `slot` under [`CART_STORAGE_KEY`].
    pub fn open(slot: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(slot, CART_STORAGE_KEY)
    }

    /// Opens the store on `slot` under a custom key.
    ///
    /// A missing or malformed slot yields an empty cart.
    pub fn with_key(slot: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = persistence::load_items(slot.as_ref(), &key);
        Self {
            subject: Subject::new(CartState::from_items(items)),
            slot,
            key,
            persist: AtomicBool::new(true),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a line, merging into an existing line with the same id, size and options.
    ///
    /// On a merge only the quantity changes; the stored name and price are kept.
    pub fn add_item(&self, item: CartLineItem) {
        let id = item.id.clone();
        let mut merged = false;
        self.commit(|mut items| {
            merged = merge_line_item(&mut items, item);
            items
        });
        debug!(id = %id, merged, "Added cart line");
    }

    /// Drops every line with identity key `id`. Unknown ids still publish once.
    pub fn remove_item(&self, id: &str) {
        self.commit(|mut items| {
            items.retain(|line| line.id != id);
            items
        });
        debug!(id, "Removed cart line");
    }

    /// Sets the quantity of the line `id`. A quantity of zero removes the line.
    pub fn update_quantity(&self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        self.commit(|mut items| {
            for line in items.iter_mut().filter(|line| line.id == id) {
                line.quantity = quantity;
            }
            items
        });
        debug!(id, quantity, "Updated cart line quantity");
    }

    /// Empties the cart and erases the durable mirror.
    pub fn clear_cart(&self) {
        self.subject.set_state(CartState::empty());
        if self.is_persisting() {
            persistence::erase(self.slot.as_ref(), &self.key);
        }
        debug!("Cleared cart");
    }

    /// Replaces the whole item list, e.g. with a remote snapshot.
    ///
    /// Zero-quantity lines in `items` are dropped.
    pub fn replace_items(&self, items: Vec<CartLineItem>) {
        let items = persistence::discard_empty_lines(items, "snapshot");
        debug!(count = items.len(), "Replacing cart contents");
        self.commit(move |_| items);
    }

    /// Erases the durable mirror without touching the in-memory cart.
    pub fn forget_persisted(&self) {
        persistence::erase(self.slot.as_ref(), &self.key);
    }

    /// Turns mirroring to the slot on or off.
    ///
    /// While off, mutations only change the in-memory cart and the slot keeps whatever
    /// it held when mirroring stopped.
    pub fn set_persistence(&self, enabled: bool) {
        self.persist.store(enabled, Ordering::SeqCst);
        debug!(enabled, "Cart mirroring toggled");
    }

    pub fn is_persisting(&self) -> bool {
        self.persist.load(Ordering::SeqCst)
    }

    /// Replaces the in-memory cart with what the slot holds. Publishes once and writes
    /// nothing.
    pub fn reload(&self) {
        let items = persistence::load_items(self.slot.as_ref(), &self.key);
        self.subject.set_state(CartState::from_items(items));
    }

    /// Applies `edit` to the item list as one atomic step, publishes the result, then
    /// mirrors it.
    fn commit<F>(&self, edit: F)
    where
        F: FnOnce(Vec<CartLineItem>) -> Vec<CartLineItem>,
    {
        let state = self
            .subject
            .update(|current| CartState::from_items(edit(current.items.clone())));
        debug!(item_count = state.item_count, subtotal = %state.subtotal, "Published cart");
        if self.is_persisting() {
            persistence::store_items(self.slot.as_ref(), &self.key, &state.items);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> CartState {
        self.subject.get_state()
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.subject.get_state().items
    }

    pub fn item_count(&self) -> u32 {
        self.subject.get_state().item_count
    }

    pub fn subtotal(&self) -> Decimal {
        self.subject.get_state().subtotal
    }

    pub fn is_empty(&self) -> bool {
        self.subject.get_state().is_empty()
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Attaches a view. The same handle attached twice is notified once.
    pub fn subscribe(&self, observer: ObserverHandle<CartState>) {
        self.subject.attach(observer);
    }

    pub fn unsubscribe(&self, observer: &ObserverHandle<CartState>) {
        self.subject.detach(observer);
    }

    /// Re-publishes the current state without changing it.
    pub fn refresh(&self) {
        self.subject.notify();
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("persist", &self.is_persisting())
            .field("subject", &self.subject)
            .finish()
    }
}
