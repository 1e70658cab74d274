//! # Collaborator Services
//!
//! The seams to the systems this crate does not own.
//!
//! ## Overview
//!
//! The storefront depends on two external collaborators: a persistence backend that
//! stores the catalog plus the carts and orders of signed-in users, and an identity
//! provider that knows who is signed in. Both are modelled as async traits so a real backend can be dropped in
//! behind them. Each trait ships with an in-memory implementation used by the demo
//! binary and the tests.
//!
//! ## Structure
//!
//! - [`catalog_service`] - [`CatalogService`] and [`InMemoryCatalogService`]
//! - [`cart_service`] - [`RemoteCartService`] and [`InMemoryCartService`]
//! - [`order_service`] - [`OrderService`] and [`InMemoryOrderService`]
//! - [`identity`] - [`IdentityProvider`] and [`InMemoryIdentityProvider`]
//!
//! ## Availability
//!
//! The in-memory catalog, cart and order services can be switched offline with
//! `set_available(false)`; every call then fails with [`ServiceError::Unavailable`].
//! The session layer uses this to exercise its local fallback.

pub mod cart_service;
pub mod catalog_service;
pub mod identity;
pub mod order_service;

pub use cart_service::*;
pub use catalog_service::*;
pub use identity::*;
pub use order_service::*;

use thiserror::Error;

/// Errors reported by the collaborator services.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The requested product, category, cart, order or account does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An order was requested for a cart without items.
    #[error("Cart is empty")]
    EmptyCart,

    /// The email/password pair did not match an account.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// An account, product or category with the same key already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The backend could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}
