//! # State Framework
//!
//! This crate provides the generic building blocks for observable, durable application
//! state. It knows nothing about the domain it serves: a cart, a form, or a settings
//! panel can all be expressed as "one value, many listeners, one durable mirror".
//!
//! ## Why Observer + Durable Slot?
//!
//! The framework pairs two small ideas:
//!
//! ### Observable State
//!
//! - One canonical value per container, replaced wholesale on every change
//! - Listeners registered through an explicit [`Observer`] capability
//! - Synchronous notification in attachment order
//!
//! ### Durable Slot
//!
//! - A key-value seam ([`KeyValueStore`]) for mirroring state across restarts
//! - In-memory and file-backed implementations
//! - Last write wins, no versioning
//!
//! Domain stores sit on top: they own a [`Subject`], recompute derived values after each
//! mutation, push the snapshot through `set_state`, then write the mirror.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`Subject`]) - holds the value and the listener list
//! 2. **Listener Layer** ([`Observer`]) - anything that wants snapshots
//! 3. **Persistence Layer** ([`KeyValueStore`]) - where snapshots survive a restart
//!
//! ## Quick Example
//!
//! ```rust
//! use state_framework::{Observer, Subject};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! struct Counter(AtomicU32);
//!
//! impl Observer<u32> for Counter {
//!     fn update(&self, state: &u32) {
//!         self.0.store(*state, Ordering::SeqCst);
//!     }
//! }
//!
//! let subject = Subject::new(0u32);
//! let counter = Arc::new(Counter(AtomicU32::new(0)));
//! subject.attach(counter.clone());
//!
//! subject.set_state(7);
//! assert_eq!(counter.0.load(Ordering::SeqCst), 7);
//! ```
//!
//! ## Concurrency Model
//!
//! - Mutations complete synchronously before returning
//! - Internal locks are released before observers run, so observers may read or even
//!   write the subject they are attached to (see the reentrancy note on [`Subject`])
//! - No cross-process coordination: the durable slot is last-write-wins
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`RecordingObserver`](mock::RecordingObserver) that keeps
//! every snapshot it receives and supports queued expectations with a final `verify()`.

pub mod error;
pub mod mock;
pub mod storage;
pub mod subject;
pub mod tracing;

// Re-export core types for convenience
pub use error::StorageError;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use subject::{Observer, ObserverHandle, Subject};
