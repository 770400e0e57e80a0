//! Logging wrapper for event observation.

use sortbus_core::{Executor, Message, Propagation};
use std::fmt::Debug;

/// An executor wrapper that logs every event it receives, and the outcome
/// of the wrapped executor, under a `tracing` span named after it.
///
/// Without the `tracing` feature it only forwards to the wrapped executor.
pub struct LoggingExecutor<X> {
    inner: X,
    name: &'static str,
}

impl<X> LoggingExecutor<X> {
    /// Wrap `inner`, logging under `name`.
    pub const fn new(inner: X, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name used in log records.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<X: Clone> Clone for LoggingExecutor<X> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<E, X> Executor<E> for LoggingExecutor<X>
where
    E: Message + Debug,
    X: Executor<E>,
{
    fn execute(&self, event: &mut E) -> Propagation {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("execute", executor = %self.name);
        #[cfg(feature = "tracing")]
        let _entered = span.enter();
        #[cfg(feature = "tracing")]
        tracing::debug!(?event, "event received");

        let outcome = self.inner.execute(event);
        #[cfg(feature = "tracing")]
        {
            if outcome.is_consumed() {
                tracing::debug!("event consumed");
            }
        }
        outcome
    }
}
