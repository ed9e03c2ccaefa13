//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with clock-driven expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::cache::{CacheStats, Clock, ExpirableEntry, MetricsRecorder, SystemClock};

// == Lookup Outcome ==
/// Result of a read-only probe, used by the shared handle to decide whether
/// a lookup needs the write path at all.
#[derive(Debug)]
pub(crate) enum Lookup<'a, V> {
    /// Entry present and unexpired
    Live(&'a V),
    /// Entry present but past its expiration instant
    Expired,
    /// No entry for the key
    Missing,
}

// == Aged Cache ==
/// In-memory key/value store whose entries expire after a per-entry
/// retention period, measured against an injected [`Clock`].
///
/// This is the single-threaded engine: writes take `&mut self`. Wrap it in
/// [`SharedAgedCache`](crate::cache::SharedAgedCache) for concurrent use.
///
/// Expired entries are discarded lazily when a lookup runs into them;
/// [`sweep_expired`](AgedCache::sweep_expired) removes them eagerly, either
/// on demand or from the periodic task in
/// [`tasks::sweep`](crate::tasks::spawn_sweep_task).
#[derive(Debug)]
pub struct AgedCache<K, V, C = SystemClock>
where
    K: Eq + Hash,
    C: Clock,
{
    /// Key-value storage
    entries: HashMap<K, ExpirableEntry<V>>,
    /// Injected time source
    clock: C,
    /// Retention applied when `put` is called without an explicit one
    default_retention: Duration,
    /// Performance counters
    metrics: MetricsRecorder,
}

impl<K, V, C> AgedCache<K, V, C>
where
    K: Eq + Hash,
    C: Clock,
{
    // == Constructor ==
    /// Creates an empty cache with the given clock and default retention.
    ///
    /// # Arguments
    /// * `clock` - Time source consulted on every write and lookup
    /// * `default_retention` - Retention for `put` calls without an explicit one
    pub fn new(clock: C, default_retention: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            default_retention,
            metrics: MetricsRecorder::new(),
        }
    }

    // == Put ==
    /// Stores a key-value pair with an optional per-entry retention.
    ///
    /// If the key already exists, the value is replaced in place and the
    /// expiration baseline resets to the clock reading taken by this call.
    /// Any value of `K` is a valid key. A zero retention stores an entry
    /// that is already expired on the next read.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `retention` - How long the entry stays live (default retention if None)
    pub fn put(&mut self, key: K, value: V, retention: Option<Duration>) {
        let now = self.clock.now_millis();
        let retention = retention.unwrap_or(self.default_retention);

        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                slot.get_mut().update(value, now, retention);
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(ExpirableEntry::new(value, now, retention));
            }
        }
    }

    // == Get ==
    /// Retrieves the value for a key.
    ///
    /// Returns the value if present and not expired. An expired entry found
    /// during the lookup is removed; this lazy eviction is the only side
    /// effect visible beyond the hit/miss counters.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now_millis();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.metrics.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.metrics.record_miss();
            self.metrics.record_expiration();
            return None;
        }

        self.metrics.record_hit();
        self.entries.get(key).map(ExpirableEntry::value)
    }

    // == Peek ==
    /// Probes a key without mutating the map.
    ///
    /// Records the hit or miss for `Live` and `Missing`; an `Expired`
    /// outcome records nothing, leaving the accounting to the eviction that
    /// follows on the write path.
    pub(crate) fn peek(&self, key: &K) -> Lookup<'_, V> {
        let now = self.clock.now_millis();

        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => Lookup::Expired,
            Some(entry) => {
                self.metrics.record_hit();
                Lookup::Live(entry.value())
            }
            None => {
                self.metrics.record_miss();
                Lookup::Missing
            }
        }
    }

    // == Size ==
    /// Returns the number of live (unexpired) entries.
    ///
    /// Expired entries still awaiting eviction are not counted.
    pub fn size(&self) -> usize {
        let now = self.clock.now_millis();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entries.
    ///
    /// Always agrees with `size() == 0`.
    pub fn is_empty(&self) -> bool {
        let now = self.clock.now_millis();
        self.entries.values().all(|entry| entry.is_expired(now))
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_millis();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.metrics.record_expirations(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache performance counters.
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.size())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockClock;

    const RETENTION: Duration = Duration::from_millis(2_000);

    fn cache() -> (MockClock, AgedCache<String, String, MockClock>) {
        let clock = MockClock::new();
        let cache = AgedCache::new(clock.clone(), RETENTION);
        (clock, cache)
    }

    #[test]
    fn test_new_cache_is_empty() {
        let (_, cache) = cache();
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_and_get() {
        let (_, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);

        assert_eq!(cache.get(&"key1".to_string()), Some(&"value1".to_string()));
        assert_eq!(cache.size(), 1);
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_get_missing_key() {
        let (_, mut cache) = cache();
        assert_eq!(cache.get(&"nope".to_string()), None);
    }

    #[test]
    fn test_put_replaces_existing_value() {
        let (_, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        cache.put("key1".to_string(), "value2".to_string(), None);

        assert_eq!(cache.get(&"key1".to_string()), Some(&"value2".to_string()));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_expiration_at_boundary() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        clock.advance(RETENTION);

        assert_eq!(cache.get(&"key1".to_string()), None);
    }

    #[test]
    fn test_live_just_before_boundary() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        clock.advance(RETENTION - Duration::from_millis(1));

        assert_eq!(cache.get(&"key1".to_string()), Some(&"value1".to_string()));
    }

    #[test]
    fn test_independent_expirations() {
        let (clock, mut cache) = cache();

        cache.put("short".to_string(), "s".to_string(), Some(Duration::from_millis(2_000)));
        cache.put("long".to_string(), "l".to_string(), Some(Duration::from_millis(4_000)));
        assert_eq!(cache.size(), 2);

        clock.advance(Duration::from_millis(3_000));

        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get(&"short".to_string()), None);
        assert_eq!(cache.get(&"long".to_string()), Some(&"l".to_string()));
    }

    #[test]
    fn test_size_reflects_expiration_without_eviction() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        cache.put("key2".to_string(), "value2".to_string(), None);

        // No get, no sweep: liveness must come from filtering alone
        clock.advance(Duration::from_millis(3_000));

        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_update_resets_expiration_baseline() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        clock.advance(Duration::from_millis(1_500));

        cache.put("key1".to_string(), "value2".to_string(), None);
        clock.advance(Duration::from_millis(1_500));

        // 3000ms after the first put, 1500ms after the refresh
        assert_eq!(cache.get(&"key1".to_string()), Some(&"value2".to_string()));
    }

    #[test]
    fn test_zero_retention_expires_immediately() {
        let (_, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), Some(Duration::ZERO));

        assert_eq!(cache.get(&"key1".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_get_is_idempotent_and_isolated() {
        let (clock, mut cache) = cache();

        cache.put("dies".to_string(), "v".to_string(), Some(Duration::from_millis(1_000)));
        cache.put("lives".to_string(), "w".to_string(), Some(Duration::from_millis(10_000)));

        clock.advance(Duration::from_millis(1_000));

        assert_eq!(cache.get(&"dies".to_string()), None);
        assert_eq!(cache.get(&"dies".to_string()), None);
        assert_eq!(cache.get(&"lives".to_string()), Some(&"w".to_string()));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_reinsert_after_expiry_revives_key() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        clock.advance(Duration::from_millis(3_000));
        assert_eq!(cache.get(&"key1".to_string()), None);

        cache.put("key1".to_string(), "value2".to_string(), None);
        assert_eq!(cache.get(&"key1".to_string()), Some(&"value2".to_string()));
    }

    #[test]
    fn test_sweep_expired() {
        let (clock, mut cache) = cache();

        cache.put("a".to_string(), "1".to_string(), Some(Duration::from_millis(1_000)));
        cache.put("b".to_string(), "2".to_string(), Some(Duration::from_millis(1_000)));
        cache.put("c".to_string(), "3".to_string(), Some(Duration::from_millis(10_000)));

        clock.advance(Duration::from_millis(2_000));

        assert_eq!(cache.sweep_expired(), 2);
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get(&"c".to_string()), Some(&"3".to_string()));
    }

    #[test]
    fn test_sweep_with_nothing_expired() {
        let (_, mut cache) = cache();

        cache.put("a".to_string(), "1".to_string(), None);

        assert_eq!(cache.sweep_expired(), 0);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_stats_accounting() {
        let (clock, mut cache) = cache();

        cache.put("key1".to_string(), "value1".to_string(), None);
        cache.get(&"key1".to_string()); // hit
        cache.get(&"absent".to_string()); // miss
        clock.advance(Duration::from_millis(3_000));
        cache.get(&"key1".to_string()); // miss + expiration

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.live_entries, 0);
    }

    #[test]
    fn test_non_string_keys() {
        let clock = MockClock::new();
        let mut cache: AgedCache<u64, Vec<u8>, MockClock> =
            AgedCache::new(clock.clone(), RETENTION);

        cache.put(7, vec![1, 2, 3], None);
        clock.advance(Duration::from_millis(1_999));

        assert_eq!(cache.get(&7), Some(&vec![1, 2, 3]));
        assert_eq!(cache.get(&8), None);
    }
}
