//! # Coffee Shop
//!
//! Storefront core for a coffee shop: menu, cart, pricing and checkout.
//!
//! ## Core Components
//!
//! - **[model]**: Plain data ([`CartLineItem`](model::CartLineItem), [`MenuItem`](model::MenuItem),
//!   [`Order`](model::Order), [`AppUser`](model::AppUser)).
//! - **[cart_store]**: The observable cart, with the guest cart mirrored to a durable slot.
//! - **[pricing]**: Base products and stackable price enhancements.
//! - **[menu]**: Menu item factories, the factory registry and the catalog.
//! - **[services]**: Catalog, remote cart, order and identity seams with in-memory
//!   implementations.
//! - **[checkout]**: Request validation, tax and fees, order placement.
//! - **[lifecycle]**: The cart session and the [`ShopSystem`](lifecycle::ShopSystem) that wires
//!   everything together.
//! - **[config]**: Environment-driven settings.
//!
//! ## Testing
//!
//! See [`state_framework::mock`] for a recording observer to assert on cart notifications.

pub mod cart_store;
pub mod checkout;
pub mod config;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod pricing;
pub mod services;
