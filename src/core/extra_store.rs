use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EXTRA_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Typed key for a value stored in an [`ExtraStore`].
///
/// Every key created with [`ExtraKey::new`] is distinct, even when two keys
/// share a name and value type.
pub struct ExtraKey<T> {
    id: u64,
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ExtraKey<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_EXTRA_KEY_ID.fetch_add(1, Ordering::Relaxed),
            name,
            _value: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn slot(&self) -> ExtraSlot {
        ExtraSlot {
            id: self.id,
            type_id: TypeId::of::<T>(),
        }
    }
}

impl<T> Clone for ExtraKey<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name,
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ExtraKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ExtraSlot {
    id: u64,
    type_id: TypeId,
}

type ExtraValue = Arc<dyn Any + Send + Sync>;

/// Auxiliary values attached to a dataset snapshot (pre-aggregated sums,
/// layer-specific metadata).
///
/// Clones share storage; the first write after a clone copies the table,
/// so a clone never observes writes made through another handle.
#[derive(Clone, Default)]
pub struct ExtraStore {
    entries: Arc<HashMap<ExtraSlot, ExtraValue>>,
}

impl ExtraStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, key: &ExtraKey<T>) -> Option<&T> {
        self.entries
            .get(&key.slot())
            .and_then(|value| value.downcast_ref::<T>())
    }

    #[must_use]
    pub fn contains<T: Any + Send + Sync>(&self, key: &ExtraKey<T>) -> bool {
        self.entries.contains_key(&key.slot())
    }

    pub fn set<T: Any + Send + Sync>(&mut self, key: &ExtraKey<T>, value: T) {
        Arc::make_mut(&mut self.entries).insert(key.slot(), Arc::new(value));
    }

    pub fn remove<T: Any + Send + Sync>(&mut self, key: &ExtraKey<T>) -> bool {
        if !self.contains(key) {
            return false;
        }
        Arc::make_mut(&mut self.entries).remove(&key.slot());
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a store holding the values of both stores.
    ///
    /// Values from `other` win on key collisions. Neither input is mutated.
    #[must_use]
    pub fn merge(&self, other: &ExtraStore) -> ExtraStore {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut merged = HashMap::with_capacity(self.len() + other.len());
        for (slot, value) in self.entries.iter().chain(other.entries.iter()) {
            merged.insert(*slot, Arc::clone(value));
        }
        ExtraStore {
            entries: Arc::new(merged),
        }
    }
}

impl fmt::Debug for ExtraStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraStore")
            .field("len", &self.entries.len())
            .finish()
    }
}
