//! # sortbus - Priority-Ordered Event Bus
//!
//! `sortbus` dispatches in-process events to executors registered for the
//! event's [`TypeKey`], in ascending priority order. Any executor can consume
//! an event, which hides it from the remaining lower-priority executors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sortbus::prelude::*;
//!
//! let bus = SortedBus::new();
//! bus.on(priority::MEDIUM, |n: &mut i32| println!("saw {n}"));
//! bus.on(priority::HIGH, |n: &mut i32| *n < 0); // consume negatives
//!
//! assert_eq!(bus.send(1), 2);
//! assert_eq!(bus.send(-1), 1);
//! ```
//!
//! ## Buses
//!
//! - [`SortedBus`]: synchronous, priority-ordered, consumption-aware
//! - [`StreamBus`]: broadcast to `Stream` subscriptions filtered by key
//!   (feature `stream`, on by default)
//!
//! ## Features
//!
//! - `stream` (default): the stream bus
//! - `tracing` (default): registration and dispatch logging through `tracing`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use sortbus_core::{
    // Errors
    BusError,
    // Executor
    DynExecutor,
    Executor,
    // Response
    IntoPropagation,
    // Message
    Message,
    Propagation,
    // Keys
    TypeKey,
    TypedExecutor,
    priority,
};

// Sorted dispatch
pub use sortbus_std::sorted::{
    DuplicatePriority, Registration, RegistrationId, Registry, SortedBus, SortedBusBuilder,
};

// Stream dispatch
#[cfg(feature = "stream")]
pub use sortbus_std::stream::{StreamBus, Subscription};

/// Standard executor implementations.
pub mod executors {
    pub use sortbus_std::executors::LoggingExecutor;
}

/// Testing utilities.
pub mod testing {
    pub use sortbus_std::testing::{CountingExecutor, RecordingExecutor};
}

/// Prelude module - common imports for sortbus.
///
/// # Usage
///
/// ```rust,ignore
/// use sortbus::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "stream")]
    pub use crate::StreamBus;
    pub use crate::{
        DuplicatePriority, Executor, IntoPropagation, Message, Propagation, RegistrationId,
        SortedBus, TypeKey, priority,
    };
}
