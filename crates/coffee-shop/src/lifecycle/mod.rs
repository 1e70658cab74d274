//! # Lifecycle
//!
//! Wiring that ties the cart to the signed-in user.
//!
//! - [`CartSession`]: forwards cart mutations to a remote cart while someone is
//!   signed in, and migrates the guest cart on sign-in.
//! - [`ShopSystem`]: builds every component from a [`ShopConfig`](crate::config::ShopConfig)
//!   and exposes the operations a front end needs.

pub mod session;
pub mod shop_system;

pub use session::{CartMode, CartSession};
pub use shop_system::ShopSystem;
