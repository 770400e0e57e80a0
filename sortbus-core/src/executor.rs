//! # Executors
//!
//! The unit of event handling. An executor receives an event by `&mut`,
//! may mutate it in place, and tells the bus whether lower-priority
//! executors should still see it.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Executor`] is generic over the event type. Buses store executors for
//! many event types side by side, so they erase them behind [`DynExecutor`],
//! which receives the event as `&mut dyn Any` and downcasts it back.

use crate::{
    message::Message,
    response::{IntoPropagation, Propagation},
};
use std::{
    any::{Any, type_name},
    marker::PhantomData,
};

/// Handles events of type `E`.
///
/// Executors run synchronously on the sending thread. Any state they keep
/// must live behind interior mutability, since buses share them by `&self`.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit;
///
/// impl Executor<Login> for Audit {
///     fn execute(&self, event: &mut Login) -> Propagation {
///         event.audited = true;
///         Propagation::Continue
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Executor<{E}>`",
    label = "missing `Executor` implementation",
    note = "Executors must implement `execute` for the event type `{E}`, or be a closure `Fn(&mut {E}) -> bool`."
)]
pub trait Executor<E: Message>: Send + Sync + 'static {
    /// Called when an event is dispatched to this executor.
    fn execute(&self, event: &mut E) -> Propagation;
}

// Blanket impl for closures
impl<E, F, R> Executor<E> for F
where
    E: Message,
    F: Fn(&mut E) -> R + Send + Sync + 'static,
    R: IntoPropagation,
{
    fn execute(&self, event: &mut E) -> Propagation {
        (self)(event).into_propagation()
    }
}

/// Type-erased, object-safe version of [`Executor`].
pub trait DynExecutor: Send + Sync + 'static {
    /// Execute against a type-erased event.
    ///
    /// Returns `None` without running the executor when the event is not of
    /// the type this executor handles.
    fn execute_dyn(&self, event: &mut dyn Any) -> Option<Propagation>;

    /// Name of the event type this executor handles.
    fn event_type(&self) -> &'static str;
}

/// Adapts an [`Executor<E>`] into a [`DynExecutor`].
pub struct TypedExecutor<E, X> {
    executor: X,
    _event: PhantomData<fn(&mut E)>,
}

impl<E, X> TypedExecutor<E, X>
where
    E: Message,
    X: Executor<E>,
{
    /// Wrap an executor.
    pub fn new(executor: X) -> Self {
        Self {
            executor,
            _event: PhantomData,
        }
    }

    /// Get a reference to the wrapped executor.
    pub fn inner(&self) -> &X {
        &self.executor
    }
}

impl<E, X> DynExecutor for TypedExecutor<E, X>
where
    E: Message,
    X: Executor<E>,
{
    fn execute_dyn(&self, event: &mut dyn Any) -> Option<Propagation> {
        let event = event.downcast_mut::<E>()?;
        Some(self.executor.execute(event))
    }

    fn event_type(&self) -> &'static str {
        type_name::<E>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Doubler;

    impl Executor<i32> for Doubler {
        fn execute(&self, event: &mut i32) -> Propagation {
            *event *= 2;
            Propagation::Continue
        }
    }

    #[test]
    fn test_struct_executor_mutates() {
        let mut value = 21;
        assert_eq!(Doubler.execute(&mut value), Propagation::Continue);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_closure_executor() {
        let consume = |n: &mut i32| *n > 10;
        assert_eq!(consume.execute(&mut 11), Propagation::Consumed);
        assert_eq!(consume.execute(&mut 1), Propagation::Continue);

        let calls = AtomicUsize::new(0);
        let observe = move |_: &mut String| {
            calls.fetch_add(1, Ordering::SeqCst);
        };
        assert_eq!(observe.execute(&mut String::new()), Propagation::Continue);
    }

    #[test]
    fn test_typed_executor_downcasts() {
        let erased: Box<dyn DynExecutor> = Box::new(TypedExecutor::new(Doubler));
        let mut value = 4i32;
        assert_eq!(
            erased.execute_dyn(&mut value),
            Some(Propagation::Continue)
        );
        assert_eq!(value, 8);
        assert_eq!(erased.event_type(), "i32");
    }

    #[test]
    fn test_typed_executor_keeps_inner() {
        let typed = TypedExecutor::<i32, _>::new(|n: &mut i32| *n > 0);
        let mut value = 3;
        assert_eq!(typed.inner().execute(&mut value), Propagation::Consumed);
    }

    #[test]
    fn test_typed_executor_rejects_other_types() {
        let erased: Box<dyn DynExecutor> = Box::new(TypedExecutor::new(Doubler));
        let mut value = 4i64;
        assert_eq!(erased.execute_dyn(&mut value), None);
        assert_eq!(value, 4);
    }
}
