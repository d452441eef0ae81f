pub mod lru;
pub mod sharded;

pub use lru::{LruCache, LruCore};
pub use sharded::ShardedLruCache;
