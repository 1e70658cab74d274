//! # Framework Errors
//!
//! Errors raised by the durable slot. The observable container itself never fails.

/// Errors that can occur while reading or writing a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
