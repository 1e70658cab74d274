//! Cart line items and the aggregate cart snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one purchasable configuration inside a cart.
///
/// A line is identified by its `id`, which is derived from the product, the chosen size
/// and the chosen option set (see [`CartLineItem::identity_key`]). Two additions of the
/// same configuration collapse into a single line with a summed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    /// Unit price, already including size and enhancements.
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    /// Size label as displayed (e.g. "Medium (16oz)").
    #[serde(default)]
    pub size: String,
    /// Option labels in the order they were chosen.
    #[serde(default)]
    pub options: Vec<String>,
}

impl CartLineItem {
    /// Builds the deterministic identity key for a configuration.
    ///
    /// Format: `{product_id}-{size}-{option values joined by '-'}`.
    ///
    /// ```rust
    /// use coffee_shop::model::CartLineItem;
    ///
    /// let key = CartLineItem::identity_key("latte-1", "medium", &["oat-milk", "vanilla"]);
    /// assert_eq!(key, "latte-1-medium-oat-milk-vanilla");
    /// ```
    pub fn identity_key<S: AsRef<str>>(product_id: &str, size: &str, options: &[S]) -> String {
        let options: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
        format!("{}-{}-{}", product_id, size, options.join("-"))
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Whether `other` describes the same configuration (id, size and options).
    pub fn same_configuration(&self, other: &CartLineItem) -> bool {
        self.id == other.id && self.size == other.size && self.options == other.options
    }
}

/// Merges `item` into `items` by configuration.
///
/// A matching line gains `item.quantity` and keeps its own name and price; otherwise
/// `item` is appended. Returns `true` when an existing line was merged into.
pub fn merge_line_item(items: &mut Vec<CartLineItem>, item: CartLineItem) -> bool {
    match items.iter_mut().find(|line| line.same_configuration(&item)) {
        Some(line) => {
            line.quantity = line.quantity.saturating_add(item.quantity);
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

/// The aggregate snapshot published by the cart store.
///
/// `item_count` and `subtotal` are always computed from `items` by
/// [`CartState::from_items`]; nothing patches them incrementally.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub item_count: u32,
    pub subtotal: Decimal,
}

impl CartState {
    /// Folds the aggregates over `items`.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let item_count = items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity));
        let subtotal = items
            .iter()
            .fold(Decimal::ZERO, |total, item| total + item.line_total());

        Self {
            items,
            item_count,
            subtotal,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
