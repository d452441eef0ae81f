//! Hash-sharded LRU cache for contended workloads.
//!
//! [`LruCache`](crate::policy::lru::LruCache) serializes every caller on one
//! lock and evicts the globally least recently used entry.
//! `ShardedLruCache` trades that exactness for throughput: keys are hashed to
//! one of N independent shards, each an [`LruCore`] behind its own mutex with
//! its own slice of the capacity.
//!
//! ```text
//!              key ──► ShardSelector ──► shard i
//!
//!   ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//!   │ Mutex<Core>  │ │ Mutex<Core>  │ │ Mutex<Core>  │ │ Mutex<Core>  │
//!   │ capacity 3   │ │ capacity 3   │ │ capacity 2   │ │ capacity 2   │
//!   └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘
//! ```
//!
//! ## Eviction contract
//!
//! Eviction is **per shard**: a put evicts the least recently used entry of
//! the key's own shard, which is not necessarily the least recently used entry
//! of the whole cache, and a shard can fill up while others still have room.
//! Each single-key operation is still linearizable because it runs entirely
//! under one shard lock. Aggregate reads (`len`, `keys_by_recency`-style
//! scans, metrics) visit shards one at a time and are not a point-in-time
//! snapshot under concurrent writes.
//!
//! With one shard the behavior is identical to `LruCache`.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ds::shard::ShardSelector;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lru::LruCore;
use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};

/// LRU cache split into independently locked shards.
pub struct ShardedLruCache<K, V> {
    selector: ShardSelector,
    shards: Arc<[Mutex<LruCore<K, V>>]>,
    capacity: usize,
}

impl<K, V> Clone for ShardedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            shards: Arc::clone(&self.shards),
            capacity: self.capacity,
        }
    }
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Splits `capacity` over `shards` shards (clamped to `1..=capacity`).
    ///
    /// ```
    /// use lrukit::policy::sharded::ShardedLruCache;
    ///
    /// let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(1024, 8);
    /// assert_eq!(cache.capacity(), 1024);
    /// assert_eq!(cache.shard_count(), 8);
    /// ```
    pub fn new(capacity: usize, shards: usize) -> Self {
        Self::with_seed(capacity, shards, 0)
    }

    /// Like [`new`](Self::new) with an explicit hash seed.
    ///
    /// A non-zero `capacity` caps the shard count, so every shard holds at
    /// least one entry.
    pub fn with_seed(capacity: usize, shards: usize, seed: u64) -> Self {
        let shards = if capacity > 0 {
            shards.min(capacity)
        } else {
            shards
        };
        let selector = ShardSelector::new(shards, seed);
        let shards: Vec<_> = (0..selector.shard_count())
            .map(|i| Mutex::new(LruCore::new(selector.shard_capacity(capacity, i))))
            .collect();
        Self {
            selector,
            shards: shards.into(),
            capacity,
        }
    }

    #[inline]
    fn shard(&self, key: &K) -> &Mutex<LruCore<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.shard(key).lock().get(key).map(f)
    }

    /// Inserts or updates `key` within its shard, evicting that shard's LRU entry if full.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.shard(&key).lock().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.shard(key).lock().touch(key)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Total capacity across shards.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Capacity and current length of each shard, in shard order.
    pub fn shard_stats(&self) -> Vec<(usize, usize)> {
        self.shards
            .iter()
            .map(|shard| {
                let core = shard.lock();
                (core.capacity(), core.len())
            })
            .collect()
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }

    /// Checks every shard; the error names the first failing shard.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (i, shard) in self.shards.iter().enumerate() {
            shard
                .lock()
                .check_invariants()
                .map_err(|err| InvariantError::new(format!("shard {i}: {err}")))?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for ShardedLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K: Send, V: Send> ConcurrentCache for ShardedLruCache<K, V> {}

#[cfg(feature = "metrics")]
impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Sum of every shard's snapshot.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.shards
            .iter()
            .map(|shard| shard.lock().metrics_snapshot())
            .fold(LruMetricsSnapshot::default(), LruMetricsSnapshot::merge)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
