//! Message trait for event types.

use std::any::Any;

/// A marker trait for values that can travel through a bus.
///
/// Messages must be `Send + Sync + 'static` so that a bus holding executors
/// for them can be shared between threads, and so that they can be keyed by
/// [`TypeId`](std::any::TypeId).
///
/// Every type meeting those bounds is a message; there is nothing to
/// implement.
///
/// # Example
///
/// ```rust,ignore
/// struct UserCreated { id: u64 }
///
/// bus.send(UserCreated { id: 7 });
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Events sent through a bus must be thread-safe and static."
)]
pub trait Message: Any + Send + Sync {}

impl<T: Any + Send + Sync> Message for T {}
