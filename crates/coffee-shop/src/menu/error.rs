//! Error types for catalog lookups and line-item building.

use thiserror::Error;

/// Errors that can occur while resolving factories or turning a selection into a cart line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// No factory is registered under the requested category key.
    #[error("No factory found for type: {0}")]
    FactoryNotFound(String),

    /// The menu item offers sizes but none of them was chosen.
    #[error("A size must be selected for {0}")]
    MissingSize(String),

    /// Quantities start at one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
}
