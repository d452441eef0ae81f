//! Deterministic key-to-shard mapping for [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache).
//!
//! ```text
//!   key ──► DefaultHasher(seed, key) ──► finish() % shards ──► shard index
//!
//!   capacity 10 over 4 shards:  [ 3 | 3 | 2 | 2 ]
//! ```
//!
//! - Deterministic: the same `(key, seed, shards)` always yields the same shard.
//! - Seeded: different seeds spread the same keys differently.
//! - `shard_for_key`: O(1) plus the cost of hashing the key.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeded hash selector mapping keys to `[0, shards)`.
///
/// # Example
///
/// ```
/// use lrukit::ds::ShardSelector;
///
/// let selector = ShardSelector::new(4, 7);
/// let shard = selector.shard_for_key(&"user:42");
/// assert!(shard < 4);
/// assert_eq!(selector.shard_for_key(&"user:42"), shard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector over `shards` shards. Zero is clamped to one.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }

    /// Share of `total` capacity owned by shard `index`.
    ///
    /// Shares differ by at most one and sum to `total`; lower shards take the
    /// remainder.
    ///
    /// ```
    /// use lrukit::ds::ShardSelector;
    ///
    /// let selector = ShardSelector::new(4, 0);
    /// let shares: Vec<_> = (0..4).map(|i| selector.shard_capacity(10, i)).collect();
    /// assert_eq!(shares, vec![3, 3, 2, 2]);
    /// ```
    pub fn shard_capacity(&self, total: usize, index: usize) -> usize {
        let base = total / self.shards;
        let extra = total % self.shards;
        base + usize::from(index < extra)
    }
}

impl Default for ShardSelector {
    /// Single shard, seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
