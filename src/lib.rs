//! lrukit: a bounded, thread-safe least-recently-used cache.
//!
//! - [`policy::lru::LruCore`]: single-threaded policy core, O(1) everything.
//! - [`policy::lru::LruCache`]: the core behind one exclusive lock; every
//!   operation is linearizable.
//! - [`policy::sharded::ShardedLruCache`]: opt-in hash sharding with
//!   per-shard eviction for contended workloads.
//! - [`ds::OrderedEntryList`]: the anchored, arena-backed recency list the
//!   cores are built on.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//! assert_eq!(cache.keys_by_recency(), vec!["c", "a"]);
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
