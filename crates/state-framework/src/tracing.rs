//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by the
//! `RUST_LOG` environment variable.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events only
//! RUST_LOG=info cargo run
//!
//! # Every mutation, with item ids and aggregates
//! RUST_LOG=debug cargo run
//!
//! # Observer attach/detach and slot writes
//! RUST_LOG=trace cargo run
//!
//! # Only the cart store
//! RUST_LOG=coffee_shop::cart_store=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Stores**: load outcome, each mutation with the resulting `item_count` and `subtotal`
//! - **Slots**: write and erase operations, and any failure (at `warn`)
//! - **Services**: one span per call via `#[instrument]`
//!
//! The formatter hides the module target (`with_target(false)`) and prints spans inline,
//! so a checkout reads as `place_order:create_order: Order created`.

/// Initializes the global `tracing` subscriber.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
