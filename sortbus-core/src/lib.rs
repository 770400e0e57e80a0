//! # sortbus-core
//!
//! Core traits for the sortbus event bus.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only defines events and executors, without pulling in the bus
//! implementations from `sortbus-std`.
//!
//! # Building Blocks
//!
//! ## Dispatch key ([`TypeKey`])
//!
//! Every value is dispatched under a key. Keys are either derived from a Rust
//! type (`TypeKey::of::<T>()`) or supplied by the caller as a named tag
//! (`TypeKey::named("audit")`). Two values reach the same listeners iff their
//! keys are equal; there is no subtype matching.
//!
//! ## Executor ([`Executor`])
//!
//! The unit of event handling: receives the event by `&mut` and returns a
//! [`Propagation`] telling the bus whether to continue with lower-priority
//! executors or stop. Closures returning `bool`, `()` or [`Propagation`] are
//! executors out of the box.
//!
//! ## Priority ([`priority`])
//!
//! Executors are ordered by an `i32` priority, lower first. The [`priority`]
//! module names the three conventional levels.
//!
//! # Error Types
//!
//! - [`BusError`] - Why a checked unregistration found nothing

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod executor;
mod key;
mod message;
pub mod priority;
mod response;

// Re-exports
pub use error::BusError;
pub use executor::{DynExecutor, Executor, TypedExecutor};
pub use key::TypeKey;
pub use message::Message;
pub use response::{IntoPropagation, Propagation};
