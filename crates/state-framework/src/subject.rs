//! # Observable State Container
//!
//! [`Subject<T>`] holds a single state value and a list of [`Observer`]s. Every call to
//! [`Subject::set_state`] replaces the value and synchronously notifies each observer,
//! in the order they were attached.
//!
//! ## Observer Identity
//!
//! Observers are shared handles ([`ObserverHandle`]). Two handles are "the same observer"
//! when they point at the same allocation, so attaching a clone of an already attached
//! handle is a no-op, and detaching needs a clone of the original handle.
//!
//! ## Reentrancy
//!
//! Notification runs with no lock held. An observer that calls `set_state` on the subject
//! it is observing will trigger a nested round of notifications before the outer round
//! finishes. This is a known hazard and is not guarded against.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Capability of receiving state snapshots from a [`Subject`].
///
/// Closures of the form `Fn(&T)` implement this trait, which is handy for
/// quick subscriptions:
///
/// ```rust
/// use state_framework::{ObserverHandle, Subject};
/// use std::sync::Arc;
///
/// let subject = Subject::new(String::from("hello"));
/// let printer: ObserverHandle<String> = Arc::new(|s: &String| assert!(!s.is_empty()));
/// subject.attach(printer);
/// subject.set_state("world".to_string());
/// ```
pub trait Observer<T>: Send + Sync {
    /// Called with the current state on every notification.
    fn update(&self, state: &T);
}

impl<T, F> Observer<T> for F
where
    F: Fn(&T) + Send + Sync,
{
    fn update(&self, state: &T) {
        self(state)
    }
}

/// Shared handle to an observer. Identity is pointer identity.
pub type ObserverHandle<T> = Arc<dyn Observer<T>>;

/// A publish-subscribe holder of a single state value.
pub struct Subject<T> {
    state: Mutex<T>,
    observers: Mutex<Vec<ObserverHandle<T>>>,
}

impl<T: Clone> Subject<T> {
    /// Creates a subject holding `initial` with no observers.
    pub fn new(initial: T) -> Self {
        Self {
            state: Mutex::new(initial),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Returns a clone of the current state.
    pub fn get_state(&self) -> T {
        lock(&self.state).clone()
    }

    /// Replaces the state unconditionally and notifies every observer.
    ///
    /// There is no equality check: setting an identical value still notifies.
    pub fn set_state(&self, next: T) {
        *lock(&self.state) = next;
        self.notify();
    }

    /// Replaces the state with `f(&current)` and notifies every observer.
    ///
    /// The read and the write happen under one lock, so two concurrent updates never
    /// overwrite each other. `f` must not touch this subject. Returns the new state.
    pub fn update<F>(&self, f: F) -> T
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let mut state = lock(&self.state);
            let next = f(&state);
            *state = next.clone();
            next
        };
        self.notify();
        next
    }

    /// Registers an observer. Attaching an already attached handle is a no-op.
    pub fn attach(&self, observer: ObserverHandle<T>) {
        let mut observers = lock(&self.observers);
        if observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            trace!("Observer already attached");
            return;
        }
        observers.push(observer);
        trace!(count = observers.len(), "Observer attached");
    }

    /// Removes an observer if present.
    pub fn detach(&self, observer: &ObserverHandle<T>) {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|o| !Arc::ptr_eq(o, observer));
        if observers.len() != before {
            trace!(count = observers.len(), "Observer detached");
        }
    }

    /// Invokes every attached observer with the current state, in attachment order.
    pub fn notify(&self) {
        // Snapshot both the value and the listener list so no lock is held
        // while observer code runs.
        let state = self.get_state();
        let observers: Vec<ObserverHandle<T>> = lock(&self.observers).clone();
        for observer in &observers {
            observer.update(&state);
        }
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }
}

impl<T: Clone + Default> Default for Subject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("state", &*lock(&self.state))
            .field("observers", &lock(&self.observers).len())
            .finish()
    }
}

/// Poisoning only records that a panic happened mid-clone; the value is still usable.
fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
