pub use crate::builder::CacheBuilder;
pub use crate::ds::{OrderedEntryList, ShardSelector, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::policy::lru::{LruCache, LruCore};
pub use crate::policy::sharded::ShardedLruCache;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
