//! Dispatch keys.

use crate::message::Message;
use std::{
    any::{TypeId, type_name},
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Type(TypeId),
    Named(Cow<'static, str>),
}

/// The key a value is dispatched under.
///
/// A key is either derived from a Rust type or a caller-chosen name.
/// `TypeKey::of::<T>()` is what a bus `send` computes for a value of type `T`,
/// so a listener registered for `T` receives every plain `send` of a `T`.
///
/// Equality is exact. `TypeKey::of::<u32>()` and `TypeKey::of::<u64>()` are
/// unrelated, and a named key never equals a type key.
#[derive(Clone)]
pub struct TypeKey {
    repr: Repr,
    label: &'static str,
}

impl TypeKey {
    /// Key of the Rust type `T`.
    pub fn of<T: Message>() -> Self {
        Self {
            repr: Repr::Type(TypeId::of::<T>()),
            label: type_name::<T>(),
        }
    }

    /// Key of the static type of `value`.
    pub fn of_val<T: Message>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// A caller-supplied named key.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            repr: Repr::Named(name.into()),
            label: "",
        }
    }

    /// Human readable name: the type name or the tag.
    pub fn name(&self) -> &str {
        match &self.repr {
            Repr::Type(_) => self.label,
            Repr::Named(name) => name,
        }
    }

    /// Whether this key was derived from a Rust type.
    pub fn is_type(&self) -> bool {
        matches!(self.repr, Repr::Type(_))
    }
}

// The label is diagnostic only.
impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Type(_) => f.debug_tuple("TypeKey::Type").field(&self.label).finish(),
            Repr::Named(name) => f.debug_tuple("TypeKey::Named").field(name).finish(),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
