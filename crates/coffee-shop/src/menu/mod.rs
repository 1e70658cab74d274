//! # Menu
//!
//! Catalog records, the factories that produce them, and the bridge from a customer's
//! selection to a cart line.
//!
//! ## Structure
//!
//! - [`factory`] - [`MenuItemFactory`] and the built-in `coffee`, `latte` and
//!   `cold-drink` archetypes
//! - [`registry`] - [`MenuItemRegistry`], an owned key-to-factory map
//! - [`selection`] - [`LineItemSelection`], which prices a choice into a [`CartLineItem`]
//! - [`catalog`] - The seeded demo menu
//! - [`error`] - [`MenuError`]
//!
//! ## Usage
//!
//! ```rust
//! use coffee_shop::menu::MenuItemRegistry;
//!
//! let registry = MenuItemRegistry::with_defaults();
//! let drip = registry
//!     .get_factory("coffee")
//!     .unwrap()
//!     .create_menu_item("drip-coffee-1", "Drip Coffee", "Batch brewed coffee", "");
//!
//! assert_eq!(drip.category, "Coffee");
//! assert!(registry.get_factory("pastry").is_err());
//! ```
//!
//! [`CartLineItem`]: crate::model::CartLineItem

pub mod catalog;
pub mod error;
pub mod factory;
pub mod registry;
pub mod selection;

pub use catalog::{filter_by_category, find_item, seed_catalog};
pub use error::*;
pub use factory::*;
pub use registry::MenuItemRegistry;
pub use selection::*;
