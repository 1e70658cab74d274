//! # Mock Observer
//!
//! Utilities for testing stores built on [`Subject`](crate::Subject).
//!
//! [`RecordingObserver`] keeps a copy of every snapshot it receives. Tests can either
//! inspect the recording afterwards, or queue expectations up front with
//! [`RecordingObserver::expect_update`] and call [`RecordingObserver::verify`] at the end.
//!
//! # Example
//! ```rust
//! use state_framework::mock::RecordingObserver;
//! use state_framework::Subject;
//!
//! let subject = Subject::new(0u32);
//! let recorder = RecordingObserver::<u32>::new();
//! subject.attach(recorder.handle());
//!
//! recorder.expect_update().matching(|n| *n == 1);
//! recorder.expect_update().matching(|n| *n == 5);
//!
//! subject.set_state(1);
//! subject.set_state(5);
//!
//! recorder.verify();
//! assert_eq!(recorder.updates(), vec![1, 5]);
//! ```

use crate::subject::{Observer, ObserverHandle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// An expected notification. Each received update pops the front expectation.
struct Expectation<T> {
    description: String,
    predicate: Predicate<T>,
}

/// An observer that records every state it is notified with.
pub struct RecordingObserver<T> {
    updates: Mutex<Vec<T>>,
    expectations: Mutex<VecDeque<Expectation<T>>>,
}

impl<T: Clone + Send + Sync + 'static> RecordingObserver<T> {
    /// Creates a new recorder with no expectations.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            updates: Mutex::new(Vec::new()),
            expectations: Mutex::new(VecDeque::new()),
        })
    }

    /// A type-erased handle suitable for `Subject::attach` / `detach`.
    pub fn handle(self: &Arc<Self>) -> ObserverHandle<T> {
        self.clone()
    }

    /// Every snapshot received so far, oldest first.
    pub fn updates(&self) -> Vec<T> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of notifications received.
    pub fn count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// The most recent snapshot, if any.
    pub fn last(&self) -> Option<T> {
        self.updates.lock().unwrap().last().cloned()
    }

    /// Forgets recorded snapshots. Pending expectations are kept.
    pub fn reset(&self) {
        self.updates.lock().unwrap().clear();
    }

    /// Expects one more notification.
    pub fn expect_update(self: &Arc<Self>) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            observer: self.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<&str> = exps.iter().map(|e| e.description.as_str()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for RecordingObserver<T> {
    fn update(&self, state: &T) {
        self.updates.lock().unwrap().push(state.clone());

        let expectation = self.expectations.lock().unwrap().pop_front();
        if let Some(expectation) = expectation {
            if !(expectation.predicate)(state) {
                panic!("Update did not match expectation: {}", expectation.description);
            }
        }
    }
}

/// Builder for update expectations.
pub struct UpdateExpectationBuilder<T> {
    observer: Arc<RecordingObserver<T>>,
}

impl<T: Clone + Send + Sync + 'static> UpdateExpectationBuilder<T> {
    /// Accept any state.
    pub fn any(self) {
        self.push("any update", Box::new(|_: &T| true));
    }

    /// Accept only a state satisfying `predicate`.
    pub fn matching<F>(self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push("matching predicate", Box::new(predicate));
    }

    fn push(self, description: &str, predicate: Predicate<T>) {
        self.observer
            .expectations
            .lock()
            .unwrap()
            .push_back(Expectation {
                description: description.to_string(),
                predicate,
            });
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static> UpdateExpectationBuilder<T> {
    /// Accept only a state equal to `expected`.
    pub fn equal_to(self, expected: T) {
        let description = format!("equal to {expected:?}");
        self.push(&description, Box::new(move |state: &T| *state == expected));
    }
}
