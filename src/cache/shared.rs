//! Shared Cache Module
//!
//! Thread-safe handle for concurrent use of the cache engine.

use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use std::time::Duration;

use super::store::Lookup;
use crate::cache::{AgedCache, CacheStats, Clock, SystemClock};

// == Shared Aged Cache ==
/// Cloneable, thread-safe handle around an [`AgedCache`].
///
/// Writes (`put`, `sweep_expired`) take an exclusive lock; lookups and the
/// size queries share a read lock and run in parallel. A lookup that finds
/// an expired entry upgrades to the write lock to evict it, re-checking the
/// entry first since a concurrent `put` may have refreshed it between the
/// two locks.
///
/// Clones share the same underlying storage.
#[derive(Debug)]
pub struct SharedAgedCache<K, V, C = SystemClock>
where
    K: Eq + Hash,
    C: Clock,
{
    inner: Arc<RwLock<AgedCache<K, V, C>>>,
}

impl<K, V, C> Clone for SharedAgedCache<K, V, C>
where
    K: Eq + Hash,
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, C> SharedAgedCache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    // == Constructor ==
    /// Creates an empty shared cache with the given clock and default
    /// retention.
    pub fn new(clock: C, default_retention: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AgedCache::new(clock, default_retention))),
        }
    }

    // == Put ==
    /// Stores a key-value pair with an optional per-entry retention.
    ///
    /// See [`AgedCache::put`].
    pub fn put(&self, key: K, value: V, retention: Option<Duration>) {
        self.write_guard().put(key, value, retention);
    }

    // == Get ==
    /// Retrieves a clone of the value for a key, if present and unexpired.
    ///
    /// The common case holds only the read lock. The write lock is taken
    /// just to evict an expired entry found during the probe.
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let guard = self.read_guard();
            match guard.peek(key) {
                Lookup::Live(value) => return Some(value.clone()),
                Lookup::Missing => return None,
                Lookup::Expired => {}
            }
        }

        self.write_guard().get(key).cloned()
    }

    // == Size ==
    /// Returns the number of live (unexpired) entries.
    pub fn size(&self) -> usize {
        self.read_guard().size()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.write_guard().sweep_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache performance counters.
    pub fn stats(&self) -> CacheStats {
        self.read_guard().stats()
    }

    // == Lock Helpers ==
    // A poisoned lock only means a panic unwound mid-guard; every mutation
    // is a single complete map operation, so the data is still coherent.
    fn read_guard(&self) -> RwLockReadGuard<'_, AgedCache<K, V, C>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, AgedCache<K, V, C>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Downgraded reference for background work that must not keep the
    /// cache alive.
    pub(crate) fn downgrade(&self) -> Weak<RwLock<AgedCache<K, V, C>>> {
        Arc::downgrade(&self.inner)
    }
}
