//! # sortbus-std
//!
//! Standard implementations for the sortbus event bus.
//!
//! This crate provides:
//! - **Sorted dispatch**: [`SortedBus`], priority-ordered and
//!   consumption-aware, with its [`Registry`]
//! - **Stream dispatch**: [`StreamBus`](stream::StreamBus), broadcast with
//!   `Stream` subscriptions (feature `stream`)
//! - **Standard executors**: Logging
//! - **Testing utilities**: Recording and counting executors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use sortbus_core;

// Modules
pub mod executors;
pub mod sorted;
#[cfg(feature = "stream")]
pub mod stream;
pub mod testing;

pub use sorted::{
    DuplicatePriority, Registration, RegistrationId, Registry, SortedBus, SortedBusBuilder,
};
