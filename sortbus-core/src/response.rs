//! Propagation outcome and conversions into it.

/// What an executor tells the bus after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// The event was observed; continue with the next executor.
    #[default]
    Continue,
    /// The event was consumed; lower-priority executors are skipped.
    Consumed,
}

impl Propagation {
    /// Whether this outcome stops the dispatch walk.
    pub const fn is_consumed(self) -> bool {
        matches!(self, Propagation::Consumed)
    }
}

/// Trait for converting an executor's output into a [`Propagation`].
///
/// # Default Implementations
///
/// - `bool` → `true` = Consumed, `false` = Continue
/// - `()` → Continue
/// - `Propagation` → As is
/// - `Option<T>` → Delegates to inner `T`, `None` continues
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a `Propagation`",
    label = "missing `IntoPropagation` implementation",
    note = "Executors must return `bool`, `()`, `Propagation` or `Option` of those."
)]
pub trait IntoPropagation {
    /// Convert the output into propagation behavior.
    fn into_propagation(self) -> Propagation;
}

impl IntoPropagation for Propagation {
    fn into_propagation(self) -> Propagation {
        self
    }
}

impl IntoPropagation for bool {
    fn into_propagation(self) -> Propagation {
        if self {
            Propagation::Consumed
        } else {
            Propagation::Continue
        }
    }
}

impl IntoPropagation for () {
    fn into_propagation(self) -> Propagation {
        Propagation::Continue
    }
}

impl<T: IntoPropagation> IntoPropagation for Option<T> {
    fn into_propagation(self) -> Propagation {
        match self {
            Some(t) => t.into_propagation(),
            None => Propagation::Continue,
        }
    }
}
