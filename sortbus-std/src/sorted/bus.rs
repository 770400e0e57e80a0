//! The priority-ordered, consumption-aware bus.

use super::registry::{DuplicatePriority, Registration, RegistrationId, Registry};
use parking_lot::ReentrantMutex;
use sortbus_core::{BusError, Executor, Message, TypeKey, TypedExecutor};
use std::{cell::RefCell, fmt, sync::Arc};

/// A bus delivering each event to the executors registered for its key, in
/// ascending priority order, until one of them consumes it.
///
/// # Locking
///
/// Registration, unregistration and dispatch all run under one reentrant
/// lock, and executors run while it is held. Other threads wait until the
/// outermost call returns.
///
/// Executors may call back into the same bus from the dispatching thread
/// (register, unregister, send). A dispatch walk iterates the registrations
/// that existed when its `send` started; changes made from inside an
/// executor apply from the next `send`.
///
/// # Example
///
/// ```rust,ignore
/// let bus = SortedBus::new();
/// bus.on(priority::MEDIUM, |n: &mut i32| { println!("medium {n}"); false });
/// bus.on(priority::HIGH, |n: &mut i32| *n < 0);
///
/// assert_eq!(bus.send(1), 2);
/// assert_eq!(bus.send(-1), 1);
/// ```
pub struct SortedBus {
    registry: ReentrantMutex<RefCell<Registry>>,
}

impl SortedBus {
    /// Create a bus with the default configuration.
    pub fn new() -> Self {
        Self::with_registry(Registry::default())
    }

    /// Start configuring a bus.
    pub fn builder() -> SortedBusBuilder {
        SortedBusBuilder::new()
    }

    fn with_registry(registry: Registry) -> Self {
        Self {
            registry: ReentrantMutex::new(RefCell::new(registry)),
        }
    }

    /// The duplicate priority policy this bus was built with.
    pub fn duplicate_policy(&self) -> DuplicatePriority {
        self.registry.lock().borrow().duplicate_policy()
    }

    /// Register an executor for events sent under `key`.
    ///
    /// Always returns a fresh id. Under [`DuplicatePriority::Collapse`], if
    /// `key` already has a registration with this `priority`, the new one is
    /// dropped and the returned id never matches a live registration.
    pub fn register<E, X>(&self, key: TypeKey, priority: i32, executor: X) -> RegistrationId
    where
        E: Message,
        X: Executor<E>,
    {
        let executor = Arc::new(TypedExecutor::<E, X>::new(executor));
        let registration = Registration::new(priority, executor);
        let id = registration.id();

        let guard = self.registry.lock();
        let stored = guard.borrow_mut().insert(key.clone(), registration);
        #[cfg(feature = "tracing")]
        {
            if stored {
                tracing::debug!(
                    %key,
                    %id,
                    priority,
                    event_type = std::any::type_name::<E>(),
                    "executor registered"
                );
            } else {
                tracing::debug!(
                    %key,
                    %id,
                    priority,
                    "priority already taken, registration dropped"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = stored;
        id
    }

    /// Register an executor for events of type `E`, keyed by `TypeKey::of::<E>()`.
    pub fn on<E, X>(&self, priority: i32, executor: X) -> RegistrationId
    where
        E: Message,
        X: Executor<E>,
    {
        self.register::<E, X>(TypeKey::of::<E>(), priority, executor)
    }

    /// Remove registration `id` from `key`. `false` if it was not there.
    pub fn unregister(&self, key: &TypeKey, id: RegistrationId) -> bool {
        self.try_unregister(key, id).is_ok()
    }

    /// Remove registration `id` from `key`, reporting why nothing was removed.
    ///
    /// An emptied key still counts as known: removing a stale id from it
    /// yields [`BusError::UnknownRegistration`].
    pub fn try_unregister(&self, key: &TypeKey, id: RegistrationId) -> Result<(), BusError> {
        let guard = self.registry.lock();
        let mut registry = guard.borrow_mut();
        if !registry.contains_key(key) {
            #[cfg(feature = "tracing")]
            tracing::debug!(%key, %id, "unregister from unknown key");
            return Err(BusError::UnknownKey(key.clone()));
        }
        if !registry.remove(key, id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(%key, %id, "unregister of unknown registration");
            return Err(BusError::UnknownRegistration {
                key: key.clone(),
                id: id.get(),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(%key, %id, "executor unregistered");
        Ok(())
    }

    /// Remove every registration for `key`. `true` iff the key had any entry.
    pub fn unregister_all(&self, key: &TypeKey) -> bool {
        let guard = self.registry.lock();
        let removed = guard.borrow_mut().remove_key(key);
        #[cfg(feature = "tracing")]
        tracing::debug!(%key, removed, "unregister all for key");
        removed
    }

    /// Remove every registration for every key.
    pub fn clear(&self) {
        let guard = self.registry.lock();
        guard.borrow_mut().clear();
        #[cfg(feature = "tracing")]
        tracing::debug!("all executors unregistered");
    }

    /// Dispatch `event` under `TypeKey::of::<E>()`.
    ///
    /// Returns the number of executors that received the event, including
    /// the one that consumed it.
    pub fn send<E: Message>(&self, mut event: E) -> usize {
        self.send_mut_as(&mut event, &TypeKey::of::<E>())
    }

    /// Dispatch `event` under an explicit `key`.
    pub fn send_as<E: Message>(&self, mut event: E, key: &TypeKey) -> usize {
        self.send_mut_as(&mut event, key)
    }

    /// Dispatch a caller-owned event under `TypeKey::of::<E>()`.
    ///
    /// Mutations made by executors remain visible to the caller.
    pub fn send_mut<E: Message>(&self, event: &mut E) -> usize {
        self.send_mut_as(event, &TypeKey::of::<E>())
    }

    /// Dispatch a caller-owned event under an explicit `key`.
    ///
    /// Registrations whose executor handles a different event type than `E`
    /// are skipped and not counted.
    pub fn send_mut_as<E: Message>(&self, event: &mut E, key: &TypeKey) -> usize {
        let guard = self.registry.lock();
        // Snapshot so executors can re-enter the registry mutably.
        let registrations = guard.borrow().get(key).to_vec();

        let mut received = 0;
        for registration in &registrations {
            let Some(outcome) = registration.executor().execute_dyn(&mut *event) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %key,
                    id = %registration.id(),
                    expected = registration.executor().event_type(),
                    sent = std::any::type_name::<E>(),
                    "event type mismatch, executor skipped"
                );
                continue;
            };
            received += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(
                %key,
                id = %registration.id(),
                priority = registration.priority(),
                ?outcome,
                "executed"
            );
            if outcome.is_consumed() {
                break;
            }
        }
        drop(guard);
        received
    }

    /// Number of live registrations for `key`.
    pub fn listener_count(&self, key: &TypeKey) -> usize {
        self.registry.lock().borrow().get(key).len()
    }

    /// Whether `id` is a live registration under `key`.
    pub fn contains(&self, key: &TypeKey, id: RegistrationId) -> bool {
        self.registry.lock().borrow().contains(key, id)
    }

    /// Whether the bus holds no registration at all.
    pub fn is_empty(&self) -> bool {
        self.registry.lock().borrow().is_empty()
    }
}

impl Default for SortedBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SortedBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.registry.lock();
        f.debug_struct("SortedBus")
            .field("registry", &*guard.borrow())
            .finish()
    }
}

/// Builder for constructing a [`SortedBus`].
///
/// # Example
/// ```ignore
/// let bus = SortedBus::builder()
///     .duplicate_priority(DuplicatePriority::Stable)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SortedBusBuilder {
    duplicates: DuplicatePriority,
}

impl SortedBusBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how registrations with an already taken priority are treated.
    pub fn duplicate_priority(mut self, policy: DuplicatePriority) -> Self {
        self.duplicates = policy;
        self
    }

    /// Build the bus.
    pub fn build(self) -> SortedBus {
        SortedBus::with_registry(Registry::new(self.duplicates))
    }
}
