//! Validated construction for the thread-safe caches.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//!
//! let sharded = CacheBuilder::new(1024).shards(8).seed(7).build_sharded::<u64, u64>();
//! assert_eq!(sharded.shard_count(), 8);
//! ```
//!
//! Signed capacities (for instance parsed from user input) go through
//! [`CacheBuilder::try_from_signed`]:
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//!
//! assert!(CacheBuilder::try_from_signed(-1).is_err());
//! let cache = CacheBuilder::try_from_signed(0).unwrap().build::<u8, u8>();
//! cache.put(1, 1);
//! assert!(cache.is_empty());
//! ```

use std::hash::Hash;

use crate::error::{ConfigError, capacity_from_signed};
use crate::policy::lru::LruCache;
use crate::policy::sharded::ShardedLruCache;

/// Builder for [`LruCache`] and [`ShardedLruCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    shards: Option<usize>,
    seed: u64,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            shards: None,
            seed: 0,
        }
    }

    /// Like [`new`](Self::new), rejecting negative capacities.
    pub fn try_from_signed(capacity: i64) -> Result<Self, ConfigError> {
        capacity_from_signed(capacity).map(Self::new)
    }

    /// Number of shards used by [`build_sharded`](Self::build_sharded).
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = Some(shards);
        self
    }

    /// Hash seed for shard selection.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Explicit shard count, or one per available CPU but never more than
    /// the capacity.
    fn resolved_shards(&self) -> usize {
        self.shards.unwrap_or_else(|| default_shard_count().min(self.capacity.max(1)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.resolved_shards() {
            0 => Err(ConfigError::new("shard count must be at least 1")),
            n if self.capacity > 0 && n > self.capacity => Err(ConfigError::new(format!(
                "shard count {n} exceeds capacity {}; some shards would hold nothing",
                self.capacity
            ))),
            _ => Ok(()),
        }
    }

    /// Builds a single-lock cache with exact global LRU eviction.
    ///
    /// The shard settings are ignored.
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::new(self.capacity)
    }

    /// Like [`build`](Self::build), but fails if the shard settings are invalid.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.validate()?;
        Ok(self.build())
    }

    /// Builds a sharded cache. Without [`shards`](Self::shards) it uses one
    /// shard per available CPU, capped by the capacity. An explicit count is
    /// clamped to `1..=capacity`.
    pub fn build_sharded<K, V>(self) -> ShardedLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        ShardedLruCache::with_seed(self.capacity, self.resolved_shards(), self.seed)
    }

    /// Like [`build_sharded`](Self::build_sharded), rejecting a zero shard
    /// count or more shards than capacity.
    ///
    /// ```rust
    /// use lrukit::builder::CacheBuilder;
    ///
    /// let err = CacheBuilder::new(16).shards(0).try_build_sharded::<u32, u32>().unwrap_err();
    /// assert!(err.message().contains("shard"));
    /// ```
    pub fn try_build_sharded<K, V>(self) -> Result<ShardedLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.validate()?;
        Ok(self.build_sharded())
    }
}

fn default_shard_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_respects_capacity() {
        let cache = CacheBuilder::new(2).build::<u64, String>();

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string()); // evicts 1

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn basic_ops_through_both_builds() {
        let single = CacheBuilder::new(10).build::<u64, String>();
        let sharded = CacheBuilder::new(10).shards(2).build_sharded::<u64, String>();

        assert_eq!(single.put(1, "one".to_string()), None);
        assert_eq!(sharded.put(1, "one".to_string()), None);
        assert_eq!(single.get(&1), Some("one".to_string()));
        assert_eq!(sharded.get(&1), Some("one".to_string()));
        assert_eq!(single.put(1, "ONE".to_string()), Some("one".to_string()));
        assert_eq!(sharded.put(1, "ONE".to_string()), Some("one".to_string()));

        single.clear();
        sharded.clear();
        assert!(single.is_empty());
        assert!(sharded.is_empty());
    }

    #[test]
    fn signed_capacity_is_validated() {
        let err = CacheBuilder::try_from_signed(-5).unwrap_err();
        assert!(err.message().contains("-5"));
        assert_eq!(CacheBuilder::try_from_signed(7).unwrap().capacity(), 7);
    }

    #[test]
    fn zero_shards_is_rejected_by_try_build() {
        let builder = CacheBuilder::new(16).shards(0);
        assert!(builder.clone().try_build::<u8, u8>().is_err());
        assert!(builder.clone().try_build_sharded::<u8, u8>().is_err());
        assert_eq!(builder.build_sharded::<u8, u8>().shard_count(), 1);
    }

    #[test]
    fn more_shards_than_capacity_is_rejected() {
        let err = CacheBuilder::new(2)
            .shards(4)
            .try_build_sharded::<u8, u8>()
            .unwrap_err();
        assert!(err.message().contains("exceeds capacity"));
        // zero capacity stores nothing anyway
        assert!(CacheBuilder::new(0).shards(4).try_build_sharded::<u8, u8>().is_ok());
    }

    #[test]
    fn default_shards_follow_parallelism() {
        let cache = CacheBuilder::new(1 << 16).build_sharded::<u32, u32>();
        assert_eq!(cache.shard_count(), default_shard_count());
        assert_eq!(cache.capacity(), 1 << 16);
    }

    #[test]
    fn default_shards_never_outnumber_capacity() {
        let tiny = CacheBuilder::new(1).try_build_sharded::<u32, u32>().unwrap();
        assert_eq!(tiny.shard_count(), 1);
        tiny.put(1, 1);
        tiny.put(2, 2);
        assert_eq!(tiny.len(), 1);
        assert_eq!(tiny.get(&2), Some(2));

        let small = CacheBuilder::new(2).try_build_sharded::<u32, u32>().unwrap();
        assert!(small.shard_count() <= 2);
        for (cap, _) in small.shard_stats() {
            assert!(cap >= 1);
        }
    }

    #[test]
    fn seed_changes_nothing_observable_for_single_shard() {
        let a = CacheBuilder::new(3).shards(1).seed(1).build_sharded::<u32, u32>();
        let b = CacheBuilder::new(3).shards(1).seed(99).build_sharded::<u32, u32>();
        for k in 0..5 {
            a.put(k, k);
            b.put(k, k);
        }
        assert_eq!(a.len(), b.len());
        assert_eq!(a.get(&4), b.get(&4));
        assert_eq!(a.get(&0), None);
    }
}
