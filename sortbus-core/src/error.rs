//! Error types for sortbus.
//!
//! Dispatch itself never fails: lookups that find nothing degrade to `false`
//! or a zero visit count. Errors are reserved for callers that want to know
//! why an unregistration found nothing.

use crate::key::TypeKey;
use thiserror::Error;

/// Errors raised by the checked bus operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Nothing was ever registered under the key, or it was removed wholesale.
    #[error("no registrations for key {0}")]
    UnknownKey(TypeKey),

    /// The key exists but does not hold the registration.
    #[error("registration #{id} is not registered under key {key}")]
    UnknownRegistration {
        /// The key that was searched.
        key: TypeKey,
        /// Raw value of the registration id.
        id: u64,
    },
}
