//! Registry module for executor management.
//!
//! Maps each [`TypeKey`] to its registrations, kept sorted by ascending
//! priority. The registry itself is not synchronized; [`SortedBus`] owns one
//! behind its lock.
//!
//! [`SortedBus`]: super::SortedBus

use sortbus_core::{DynExecutor, TypeKey};
use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by registration, used to unregister later.
///
/// Ids are allocated from a process-wide counter: they are unique across all
/// buses, increase monotonically and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl RegistrationId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the registry treats a registration whose priority is already taken
/// for the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePriority {
    /// At most one registration per priority and key. A later registration
    /// with a taken priority is dropped; the first one stays in place.
    #[default]
    Collapse,
    /// Keep every registration. Equal priorities dispatch in insertion order.
    Stable,
}

/// A stored executor with its dispatch metadata.
#[derive(Clone)]
pub struct Registration {
    id: RegistrationId,
    priority: i32,
    executor: Arc<dyn DynExecutor>,
}

impl Registration {
    /// Create a registration with a freshly allocated id.
    pub fn new(priority: i32, executor: Arc<dyn DynExecutor>) -> Self {
        Self {
            id: RegistrationId::next(),
            priority,
            executor,
        }
    }

    /// The registration's id.
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// The registration's priority (lower = dispatched first).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Get the executor.
    pub fn executor(&self) -> &dyn DynExecutor {
        &*self.executor
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("event_type", &self.executor.event_type())
            .finish()
    }
}

/// Priority-ordered registrations per key.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<TypeKey, Vec<Registration>>,
    duplicates: DuplicatePriority,
}

impl Registry {
    /// Create an empty registry with the given duplicate policy.
    pub fn new(duplicates: DuplicatePriority) -> Self {
        Self {
            entries: HashMap::new(),
            duplicates,
        }
    }

    /// The duplicate policy in effect.
    pub fn duplicate_policy(&self) -> DuplicatePriority {
        self.duplicates
    }

    /// Insert a registration under `key`.
    ///
    /// Returns `false` when the policy dropped it because its priority is
    /// already taken. The key's entry is created either way.
    pub fn insert(&mut self, key: TypeKey, registration: Registration) -> bool {
        let list = self.entries.entry(key).or_default();
        let priority = registration.priority;
        match self.duplicates {
            DuplicatePriority::Collapse => {
                match list.binary_search_by_key(&priority, |r| r.priority) {
                    Ok(_) => false,
                    Err(pos) => {
                        list.insert(pos, registration);
                        true
                    }
                }
            }
            DuplicatePriority::Stable => {
                let pos = list.partition_point(|r| r.priority <= priority);
                list.insert(pos, registration);
                true
            }
        }
    }

    /// Remove the registration `id` from `key`.
    ///
    /// An emptied key keeps its (empty) entry.
    pub fn remove(&mut self, key: &TypeKey, id: RegistrationId) -> bool {
        let Some(list) = self.entries.get_mut(key) else {
            return false;
        };
        match list.iter().position(|r| r.id == id) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every registration for `key`. `true` iff the key had an entry.
    pub fn remove_key(&mut self, key: &TypeKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every key and registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registrations for `key` in dispatch order.
    pub fn get(&self, key: &TypeKey) -> &[Registration] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `key` has an entry, even an emptied one.
    pub fn contains_key(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `id` is currently stored under `key`.
    pub fn contains(&self, key: &TypeKey, id: RegistrationId) -> bool {
        self.get(key).iter().any(|r| r.id == id)
    }

    /// Number of keys with an entry, including emptied ones.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no registration is stored under any key.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbus_core::{TypedExecutor, priority};

    fn reg(priority: i32) -> Registration {
        Registration::new(
            priority,
            Arc::new(TypedExecutor::<i32, _>::new(|_: &mut i32| false)),
        )
    }

    fn priorities(registry: &Registry, key: &TypeKey) -> Vec<i32> {
        registry.get(key).iter().map(Registration::priority).collect()
    }

    #[test]
    fn test_ids_are_monotonic() {
        let a = reg(0).id();
        let b = reg(0).id();
        assert!(b > a);
        assert!(b.get() > a.get());
        assert_eq!(a.to_string(), format!("#{}", a.get()));
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let key = TypeKey::of::<i32>();
        let mut registry = Registry::default();
        assert!(registry.insert(key.clone(), reg(priority::LOW)));
        assert!(registry.insert(key.clone(), reg(priority::HIGH)));
        assert!(registry.insert(key.clone(), reg(priority::MEDIUM)));
        assert!(registry.insert(key.clone(), reg(-5)));
        assert_eq!(priorities(&registry, &key), vec![-5, 100, 500, 1000]);
    }

    #[test]
    fn test_collapse_drops_duplicate_priority() {
        let key = TypeKey::of::<i32>();
        let mut registry = Registry::new(DuplicatePriority::Collapse);
        let first = reg(priority::HIGH);
        let second = reg(priority::HIGH);
        let (first_id, second_id) = (first.id(), second.id());

        assert!(registry.insert(key.clone(), first));
        assert!(!registry.insert(key.clone(), second));
        assert!(registry.contains(&key, first_id));
        assert!(!registry.contains(&key, second_id));
        assert_eq!(registry.get(&key).len(), 1);
    }

    #[test]
    fn test_stable_keeps_insertion_order() {
        let key = TypeKey::of::<i32>();
        let mut registry = Registry::new(DuplicatePriority::Stable);
        let regs: Vec<_> = (0..3).map(|_| reg(priority::HIGH)).collect();
        let ids: Vec<_> = regs.iter().map(Registration::id).collect();
        registry.insert(key.clone(), reg(priority::LOW));
        for r in regs {
            assert!(registry.insert(key.clone(), r));
        }
        registry.insert(key.clone(), reg(0));

        let stored: Vec<_> = registry.get(&key).iter().map(Registration::id).collect();
        assert_eq!(&stored[1..4], ids.as_slice());
        assert_eq!(priorities(&registry, &key), vec![0, 100, 100, 100, 1000]);
    }

    #[test]
    fn test_remove_by_id() {
        let key = TypeKey::of::<i32>();
        let mut registry = Registry::default();
        let r = reg(priority::MEDIUM);
        let id = r.id();
        registry.insert(key.clone(), r);

        assert!(registry.remove(&key, id));
        assert!(!registry.remove(&key, id));
        assert!(!registry.remove(&TypeKey::named("unknown"), id));
        assert!(registry.get(&key).is_empty());
    }

    #[test]
    fn test_emptied_key_keeps_entry() {
        let key = TypeKey::of::<i32>();
        let mut registry = Registry::default();
        let r = reg(priority::MEDIUM);
        let id = r.id();
        registry.insert(key.clone(), r);
        registry.remove(&key, id);

        assert!(registry.is_empty());
        assert_eq!(registry.key_count(), 1);
        assert!(registry.contains_key(&key));
        assert!(registry.remove_key(&key));
        assert!(!registry.contains_key(&key));
        assert!(!registry.remove_key(&key));
    }

    #[test]
    fn test_clear() {
        let mut registry = Registry::default();
        registry.insert(TypeKey::of::<i32>(), reg(1));
        registry.insert(TypeKey::named("audit"), reg(1));
        registry.clear();
        assert_eq!(registry.key_count(), 0);
        assert!(registry.get(&TypeKey::of::<i32>()).is_empty());
    }
}
