//! # Least Recently Used (LRU) Cache
//!
//! A bounded key-value cache that evicts the least recently accessed entry
//! when a new key arrives at a full cache. Lookup, insert, update, removal and
//! eviction are all O(1).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                  Arc<Mutex<LruCore<K, V>>>                   │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                                 │                                    │
//!   │                                 ▼                                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                       LruCore<K, V>                          │   │
//!   │   │                                                              │   │
//!   │   │   FxHashMap<K, SlotId>        OrderedEntryList<Entry<K, V>>  │   │
//!   │   │   ┌───────┬──────┐                                           │   │
//!   │   │   │ key_a │ id_2 │ ─────► [MRU] ◄─► [a] ◄─► [b] ◄─► [LRU]    │   │
//!   │   │   │ key_b │ id_3 │ ───────────────────────┘                  │   │
//!   │   │   └───────┴──────┘                                           │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns every `Entry { key, value }`; the map only holds `SlotId`
//! handles into it. Both are updated together inside each operation, so the
//! map and the list always agree on membership.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!     before:  [MRU] ◄─► A ◄─► B ◄─► C ◄─► [LRU]
//!     1. evict C (entry before the LRU anchor), drop its map binding
//!     2. link D after the MRU anchor, bind D in the map
//!     after:   [MRU] ◄─► D ◄─► A ◄─► B ◄─► [LRU]
//!
//!   get(B)
//!     1. map lookup: O(1)
//!     2. unlink B, relink after the MRU anchor: O(1)
//!     after:   [MRU] ◄─► B ◄─► D ◄─► A ◄─► [LRU]
//! ```
//!
//! ## Types
//!
//! | Type             | Thread-safe | Notes                                        |
//! |------------------|-------------|----------------------------------------------|
//! | `LruCore<K, V>`  | no          | policy core, implements the cache traits     |
//! | `LruCache<K, V>` | yes         | one `parking_lot::Mutex` around the core     |
//!
//! ## Concurrency Model
//!
//! Every `LruCache` method takes the single mutex for its whole
//! lookup/reorder/evict sequence, including read-only calls such as
//! `contains` and `len`. Operations are therefore linearizable and no caller
//! ever sees the map and the list disagree. `get` reorders, so it could not
//! use a shared read lock anyway.
//!
//! ## Capacity
//!
//! Zero is a valid capacity: such a cache stores nothing, every `put` of a
//! new key is dropped and every `get` misses. Signed capacities go through
//! [`LruCache::try_with_capacity`] / [`LruCore::try_with_capacity`], which
//! reject negatives with a [`ConfigError`].
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let cache = LruCache::new(3);
//! cache.put(1, 10);
//! cache.put(2, 20);
//! cache.put(3, 30);
//!
//! assert_eq!(cache.get(&1), Some(10));   // 1 is now most recent
//! cache.put(4, 40);                      // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(30));
//! assert_eq!(cache.get(&4), Some(40));
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::entry_list::OrderedEntryList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError, capacity_from_signed};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};

/// Upper bound on slots reserved by [`LruCore::new`]; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 1 << 16;

/// One cached binding; the key is kept so eviction can drop the map entry.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Single-threaded LRU policy core.
///
/// Use [`LruCache`] to share a cache between threads.
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    list: OrderedEntryList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty core holding at most `capacity` entries.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let cache: LruCore<u32, String> = LruCore::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let reserved = capacity.min(MAX_PREALLOCATED);
        LruCore {
            index: FxHashMap::with_capacity_and_hasher(reserved, Default::default()),
            list: OrderedEntryList::with_capacity(reserved),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Fallible constructor for signed capacities; negatives are rejected.
    pub fn try_with_capacity(capacity: i64) -> Result<Self, ConfigError> {
        capacity_from_signed(capacity).map(Self::new)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies that the key index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a different key than its index binding",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index binding points at vacant slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    /// Unlinks the least recently used entry from both the list and the index.
    fn take_least_recent(&mut self) -> Option<(K, V)> {
        let Entry { key, value } = self.list.evict_least_recent()?;
        self.index.remove(&key);
        Some((key, value))
    }

    #[inline]
    fn debug_check_coupling(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.list.len(),
            "key index and recency list diverged"
        );
        debug_assert!(self.index.len() <= self.capacity);
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.list.move_to_most_recent(id);
            self.debug_check_coupling();
            return previous;
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            self.take_least_recent();
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let id = self.list.push_most_recent(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.debug_check_coupling();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_most_recent(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.list.remove(id);
        self.debug_check_coupling();

        #[cfg(feature = "metrics")]
        if entry.is_some() {
            self.metrics.record_remove_found();
        }

        entry.map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.take_least_recent()?;
        self.debug_check_coupling();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(popped)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list
            .peek_least_recent()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let moved = self.list.move_to_most_recent(id);

        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }

        moved
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|entry| entry.key == *key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot::from_metrics(&self.metrics, self.index.len(), self.capacity)
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Capacity 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache: one exclusive lock around an [`LruCore`].
///
/// Cloning is cheap and yields another handle to the same cache.
pub struct LruCache<K, V> {
    inner: Arc<Mutex<LruCore<K, V>>>,
}

impl<K, V> Clone for LruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries. Zero is allowed.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from(LruCore::new(capacity))
    }

    /// Creates a cache from a signed capacity, rejecting negatives.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_with_capacity(0).is_ok());
    /// assert!(LruCache::<u32, u32>::try_with_capacity(-3).is_err());
    /// ```
    pub fn try_with_capacity(capacity: i64) -> Result<Self, ConfigError> {
        LruCore::try_with_capacity(capacity).map(Self::from)
    }

    /// Returns a copy of the value and marks `key` as most recently used.
    ///
    /// A miss changes nothing.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Like [`get`](Self::get) but hands `f` a borrow instead of cloning.
    ///
    /// `f` runs while the lock is held, so keep it short and never touch this
    /// cache from inside it.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::new(2);
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Some(5));
    /// ```
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns the replaced value for an existing key. A new key arriving at a
    /// full cache evicts the least recently used entry first; a zero-capacity
    /// cache drops the new key.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::new(4);
    /// assert_eq!(cache.put(1, 10), None);
    /// assert_eq!(cache.put(1, 99), Some(10));
    /// assert_eq!(cache.get(&1), Some(99));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Removes `key` from the index and the recency list together.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Reads a value without changing recency order.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Marks `key` as most recently used without reading it.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Copies out the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .peek_lru()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.inner.lock().recency_rank(key)
    }

    /// Keys from most to least recently used, captured under one lock.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.inner.lock().keys_by_recency()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V> From<LruCore<K, V>> for LruCache<K, V> {
    fn from(core: LruCore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(core)),
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LruCache")
            .field("len", &core.index.len())
            .field("capacity", &core.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Capacity 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K: Send, V: Send> ConcurrentCache for LruCache<K, V> {}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    pub fn reset_metrics(&self) {
        self.inner.lock().reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}


#[cfg(test)]
mod property_tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;

    /// Straightforward O(n) LRU used as the reference; front is most recent.
    struct Model {
        capacity: usize,
        entries: VecDeque<(u8, u32)>,
    }

    impl Model {
        fn get(&mut self, key: u8) -> Option<u32> {
            let pos = self.entries.iter().position(|(k, _)| *k == key)?;
            let entry = self.entries.remove(pos).unwrap();
            self.entries.push_front(entry);
            Some(entry.1)
        }

        fn put(&mut self, key: u8, value: u32) -> Option<u32> {
            if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
                let (_, old) = self.entries.remove(pos).unwrap();
                self.entries.push_front((key, value));
                return Some(old);
            }
            if self.capacity == 0 {
                return None;
            }
            if self.entries.len() == self.capacity {
                self.entries.pop_back();
            }
            self.entries.push_front((key, value));
            None
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Put(u8, u32),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..24).prop_map(Op::Get),
            3 => (0u8..24, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
            1 => (0u8..24).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: every return value and the full recency order match the model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_lru(
            capacity in 0usize..10,
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let mut cache = LruCore::new(capacity);
            let mut model = Model { capacity, entries: VecDeque::new() };

            for op in ops {
                match op {
                    Op::Get(k) => {
                        prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                    },
                    Op::Put(k, v) => {
                        prop_assert_eq!(cache.insert(k, v), model.put(k, v));
                    },
                    Op::Remove(k) => {
                        let expected = model
                            .entries
                            .iter()
                            .position(|(mk, _)| *mk == k)
                            .and_then(|pos| model.entries.remove(pos))
                            .map(|(_, v)| v);
                        prop_assert_eq!(cache.remove(&k), expected);
                    },
                }
                prop_assert!(cache.len() <= capacity);
                prop_assert!(cache.check_invariants().is_ok());
                let order: Vec<u8> = model.entries.iter().map(|(k, _)| *k).collect();
                prop_assert_eq!(cache.keys_by_recency(), order);
            }
        }

        /// Property: after get(k), an evicting put never evicts k (capacity > 1)
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_accessed_key_survives_next_eviction(
            capacity in 2usize..8,
            keys in prop::collection::vec(0u16..64, 1..64),
            pick in any::<prop::sample::Index>()
        ) {
            let mut cache = LruCore::new(capacity);
            for &k in &keys {
                cache.insert(k, ());
            }
            let present = cache.keys_by_recency();
            let target = present[pick.index(present.len())];
            cache.get(&target);

            let fresh = 1_000u16;
            cache.insert(fresh, ());
            prop_assert!(cache.contains(&target));
            prop_assert!(cache.len() <= capacity);
        }
    }
}
