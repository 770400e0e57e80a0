//! Priority-ordered dispatch.
//!
//! [`SortedBus`] keeps, per [`TypeKey`](sortbus_core::TypeKey), a list of
//! registrations sorted by ascending priority, and walks it on every send
//! until an executor consumes the event.

pub mod bus;
pub mod registry;

pub use bus::{SortedBus, SortedBusBuilder};
pub use registry::{DuplicatePriority, Registration, RegistrationId, Registry};
