use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{trace, warn};

static NEXT_NAMESPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the owner of a group of cache entries.
///
/// Two namespaces never collide, even with equal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheNamespace {
    id: u64,
    name: &'static str,
}

impl CacheNamespace {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_NAMESPACE_ID.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }
}

/// One component of a structural cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheArg {
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    Text(String),
}

impl From<i64> for CacheArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for CacheArg {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CacheArg {
    fn from(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }
}

impl From<bool> for CacheArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for CacheArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CacheArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

pub type CacheArgs = SmallVec<[CacheArg; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    namespace: CacheNamespace,
    args: CacheArgs,
}

type CacheValue = Box<dyn Any + Send + Sync>;

/// Runtime metrics exposed by the cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStoreStats {
    pub hits: u64,
    pub misses: u64,
    pub current_size: usize,
    pub previous_size: usize,
}

/// Two-generation memoization table for per-pass measurements.
///
/// Reads hit the current generation first, then the previous one, promoting
/// previous-generation hits. `purge` drops the previous generation and
/// demotes the current one, so an entry survives exactly one pass without
/// being requested.
#[derive(Default)]
pub struct CacheStore {
    current: HashMap<CacheKey, CacheValue>,
    previous: HashMap<CacheKey, CacheValue>,
    hits: u64,
    misses: u64,
}

impl CacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, promoting it into the current generation.
    pub fn get<V: Any + Send + Sync>(
        &mut self,
        namespace: CacheNamespace,
        args: CacheArgs,
    ) -> Option<&V> {
        let key = CacheKey { namespace, args };
        if !self.promote(&key) {
            self.misses = self.misses.saturating_add(1);
            return None;
        }
        let found = self
            .current
            .get(&key)
            .and_then(|value| value.downcast_ref::<V>());
        if found.is_some() {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
        found
    }

    pub fn set<V: Any + Send + Sync>(
        &mut self,
        namespace: CacheNamespace,
        args: CacheArgs,
        value: V,
    ) {
        let key = CacheKey { namespace, args };
        self.previous.remove(&key);
        self.current.insert(key, Box::new(value));
    }

    /// Returns the cached value or computes, stores and returns it.
    pub fn get_or_set<V, F>(&mut self, namespace: CacheNamespace, args: CacheArgs, compute: F) -> &V
    where
        V: Any + Send + Sync,
        F: FnOnce() -> V,
    {
        let key = CacheKey { namespace, args };
        let cached = self.promote(&key)
            && self
                .current
                .get(&key)
                .is_some_and(|value| value.is::<V>());

        if cached {
            self.hits = self.hits.saturating_add(1);
        } else {
            if self.current.contains_key(&key) {
                warn!(
                    namespace = namespace.name(),
                    "cache entry has an unexpected type, recomputing"
                );
            }
            self.misses = self.misses.saturating_add(1);
            self.current.insert(key.clone(), Box::new(compute()));
        }

        match self
            .current
            .get(&key)
            .and_then(|value| value.downcast_ref::<V>())
        {
            Some(value) => value,
            None => unreachable!("entry was inserted with type V above"),
        }
    }

    /// Ends a pass: evicts entries not requested since the previous purge.
    pub fn purge(&mut self) {
        let evicted = self.previous.len();
        self.previous = std::mem::take(&mut self.current);
        trace!(evicted, retained = self.previous.len(), "cache store purged");
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStoreStats {
        CacheStoreStats {
            hits: self.hits,
            misses: self.misses,
            current_size: self.current.len(),
            previous_size: self.previous.len(),
        }
    }

    fn promote(&mut self, key: &CacheKey) -> bool {
        if self.current.contains_key(key) {
            return true;
        }
        match self.previous.remove(key) {
            Some(value) => {
                self.current.insert(key.clone(), value);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Builds [`CacheArgs`] from heterogeneous values.
#[macro_export]
macro_rules! cache_args {
    ($($arg:expr),* $(,)?) => {{
        let mut args = $crate::core::CacheArgs::new();
        $(args.push($crate::core::CacheArg::from($arg));)*
        args
    }};
}
