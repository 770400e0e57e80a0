//! Testing utilities for sortbus.
//!
//! This module provides executors that make assertions about dispatch easy.
//!
//! # Features
//!
//! - [`RecordingExecutor`]: Records every event it receives, optionally
//!   consuming them
//! - [`CountingExecutor`]: Counts invocations
//!
//! Both are cheap handles: clones share their state, so one clone can be
//! registered while the test keeps another for inspection.

use parking_lot::Mutex;
use sortbus_core::{Executor, Message, Propagation};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Executor
// ============================================================================

/// An executor that records all events it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingExecutor::<i32>::new();
/// bus.on(priority::MEDIUM, recorder.clone());
///
/// bus.send(1);
/// assert_eq!(recorder.values(), vec![1]);
/// ```
pub struct RecordingExecutor<E> {
    values: Arc<Mutex<Vec<E>>>,
    outcome: Propagation,
}

impl<E: Clone> RecordingExecutor<E> {
    /// Create a recorder that lets events continue.
    pub fn new() -> Self {
        Self::with_outcome(Propagation::Continue)
    }

    /// Create a recorder that consumes every event it receives.
    pub fn consuming() -> Self {
        Self::with_outcome(Propagation::Consumed)
    }

    /// Create a recorder returning a specific outcome.
    pub fn with_outcome(outcome: Propagation) -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    /// Get a clone of the recorded events.
    pub fn values(&self) -> Vec<E> {
        self.values.lock().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.values.lock().clear();
    }
}

impl<E: Clone> Default for RecordingExecutor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for RecordingExecutor<E> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            outcome: self.outcome,
        }
    }
}

impl<E: Message + Clone> Executor<E> for RecordingExecutor<E> {
    fn execute(&self, event: &mut E) -> Propagation {
        self.values.lock().push(event.clone());
        self.outcome
    }
}

// ============================================================================
// Counting Executor
// ============================================================================

/// An executor that counts invocations, for any event type.
#[derive(Default)]
pub struct CountingExecutor {
    count: Arc<AtomicUsize>,
    outcome: Propagation,
}

impl CountingExecutor {
    /// Create a counter that lets events continue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter that consumes every event it receives.
    pub fn consuming() -> Self {
        Self {
            count: Arc::default(),
            outcome: Propagation::Consumed,
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Clone for CountingExecutor {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            outcome: self.outcome,
        }
    }
}

impl<E: Message> Executor<E> for CountingExecutor {
    fn execute(&self, _event: &mut E) -> Propagation {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_clones_share_values() {
        let recorder = RecordingExecutor::<i32>::new();
        let registered = recorder.clone();
        assert_eq!(registered.execute(&mut 1), Propagation::Continue);
        assert_eq!(registered.execute(&mut 2), Propagation::Continue);
        assert_eq!(recorder.values(), vec![1, 2]);

        recorder.clear();
        assert!(registered.is_empty());
    }

    #[test]
    fn test_consuming_recorder() {
        let recorder = RecordingExecutor::<String>::consuming();
        assert_eq!(
            recorder.execute(&mut "x".to_string()),
            Propagation::Consumed
        );
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_counter_accepts_any_event() {
        let counter = CountingExecutor::new();
        Executor::<i32>::execute(&counter, &mut 1);
        Executor::<String>::execute(&counter, &mut String::new());
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(counter.clone().count(), 0);
    }
}
