//! # Cache Trait Hierarchy
//!
//! Single-threaded caches implement a small stack of traits so callers can be
//! generic over the policy core; the thread-safe wrappers expose the same
//! operations through `&self` and are tagged with [`ConcurrentCache`].
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains / len / is_empty / capacity   │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```

/// Operations every cache core supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCore::new(8);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// A new key arriving at a full cache evicts according to the policy first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, updating policy state (recency) on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks membership without touching policy state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removal by key.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCore::new(4);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// assert_eq!(cache.remove_batch(&[1, 99, 3]), vec![Some("one"), None, Some("three")]);
/// assert_eq!(cache.len(), 1);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order; the default loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-order operations.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCore::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
///
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// assert!(cache.touch(&2));
/// assert_eq!(cache.recency_rank(&2), Some(0));
///
/// assert_eq!(cache.pop_lru(), Some((3, "c")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position in recency order (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that are safe to share across threads by reference.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lru::LruCore;

    fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
        for i in 0..n {
            cache.insert(i, i * 10);
        }
    }

    #[test]
    fn generic_fill_respects_capacity() {
        let mut cache = LruCore::new(4);
        fill(&mut cache, 10);
        assert_eq!(cache.len(), 4);
        assert!(!cache.is_empty());
        assert_eq!(CoreCache::capacity(&cache), 4);
    }

    #[test]
    fn remove_batch_default_preserves_order() {
        let mut cache = LruCore::new(8);
        fill(&mut cache, 3);
        let removed = MutableCache::remove_batch(&mut cache, &[2, 5, 0]);
        assert_eq!(removed, vec![Some(20), None, Some(0)]);
    }

    #[test]
    fn core_cache_insert_returns_previous_value() {
        let mut cache = LruCore::new(2);
        assert_eq!(CoreCache::insert(&mut cache, 1, 1), None);
        assert_eq!(CoreCache::insert(&mut cache, 1, 2), Some(1));
    }
}
