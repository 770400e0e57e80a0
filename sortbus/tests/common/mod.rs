#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct DummyEvent {
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub message: String,
}

// ============================================================================
// Order Recording
// ============================================================================

/// Shared log of executor names, in invocation order.
#[derive(Clone, Default)]
pub struct OrderLog(Arc<Mutex<Vec<&'static str>>>);

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// An executor for `i32` that appends `name` and returns `consume`.
    pub fn executor(
        &self,
        name: &'static str,
        consume: bool,
    ) -> impl Fn(&mut i32) -> bool + Send + Sync + 'static {
        let log = self.0.clone();
        move |_: &mut i32| {
            log.lock().push(name);
            consume
        }
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().clone()
    }
}
