//! Durable mirror of the cart item list.
//!
//! The slot holds a JSON array of [`CartLineItem`]. Reading never fails from the
//! caller's point of view: anything that cannot be turned back into items is logged
//! and reported as "nothing stored".

use crate::model::CartLineItem;
use state_framework::storage::{load_json, save_json};
use state_framework::KeyValueStore;
use tracing::{debug, warn};

/// Loads the persisted items, or an empty list if the slot is absent or unreadable.
pub fn load_items(slot: &dyn KeyValueStore, key: &str) -> Vec<CartLineItem> {
    match load_json::<Vec<CartLineItem>>(slot, key) {
        Ok(Some(items)) => {
            let items = discard_empty_lines(items, key);
            debug!(key, count = items.len(), "Loaded persisted cart");
            items
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable persisted cart");
            Vec::new()
        }
    }
}

/// Drops lines whose quantity is zero. Every line in a cart holds at least one unit.
///
/// `origin` names where the items came from, for the log.
pub fn discard_empty_lines(mut items: Vec<CartLineItem>, origin: &str) -> Vec<CartLineItem> {
    let before = items.len();
    items.retain(|line| line.quantity > 0);
    if items.len() != before {
        warn!(origin, dropped = before - items.len(), "Dropping zero-quantity cart lines");
    }
    items
}

/// Writes `items` to the slot. Failures are logged, not returned.
pub fn store_items(slot: &dyn KeyValueStore, key: &str, items: &[CartLineItem]) {
    if let Err(e) = save_json(slot, key, items) {
        warn!(key, error = %e, "Failed to persist cart");
    }
}

/// Erases the slot. Failures are logged, not returned.
pub fn erase(slot: &dyn KeyValueStore, key: &str) {
    if let Err(e) = slot.remove(key) {
        warn!(key, error = %e, "Failed to erase persisted cart");
    }
}
