use crate::metrics::metrics_impl::LruMetrics;

/// Point-in-time copy of an LRU cache's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_rejected: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clear_calls: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    pub fn from_metrics(metrics: &LruMetrics, cache_len: usize, capacity: usize) -> Self {
        Self {
            get_calls: metrics.get_calls,
            get_hits: metrics.get_hits,
            get_misses: metrics.get_misses,
            insert_calls: metrics.insert_calls,
            insert_updates: metrics.insert_updates,
            insert_new: metrics.insert_new,
            insert_rejected: metrics.insert_rejected,
            evict_calls: metrics.evict_calls,
            evicted_entries: metrics.evicted_entries,
            remove_calls: metrics.remove_calls,
            remove_found: metrics.remove_found,
            pop_lru_calls: metrics.pop_lru_calls,
            pop_lru_found: metrics.pop_lru_found,
            touch_calls: metrics.touch_calls,
            touch_found: metrics.touch_found,
            clear_calls: metrics.clear_calls,
            cache_len,
            capacity,
        }
    }

    /// Fraction of `get` calls that hit, or `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Field-wise sum, used to aggregate shards.
    pub fn merge(self, other: Self) -> Self {
        Self {
            get_calls: self.get_calls + other.get_calls,
            get_hits: self.get_hits + other.get_hits,
            get_misses: self.get_misses + other.get_misses,
            insert_calls: self.insert_calls + other.insert_calls,
            insert_updates: self.insert_updates + other.insert_updates,
            insert_new: self.insert_new + other.insert_new,
            insert_rejected: self.insert_rejected + other.insert_rejected,
            evict_calls: self.evict_calls + other.evict_calls,
            evicted_entries: self.evicted_entries + other.evicted_entries,
            remove_calls: self.remove_calls + other.remove_calls,
            remove_found: self.remove_found + other.remove_found,
            pop_lru_calls: self.pop_lru_calls + other.pop_lru_calls,
            pop_lru_found: self.pop_lru_found + other.pop_lru_found,
            touch_calls: self.touch_calls + other.touch_calls,
            touch_found: self.touch_found + other.touch_found,
            clear_calls: self.clear_calls + other.clear_calls,
            cache_len: self.cache_len + other.cache_len,
            capacity: self.capacity + other.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_calls() {
        assert_eq!(LruMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_is_hits_over_calls() {
        let snap = LruMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snap.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_sums_fields() {
        let a = LruMetricsSnapshot {
            get_hits: 1,
            evicted_entries: 2,
            cache_len: 3,
            capacity: 4,
            ..Default::default()
        };
        let b = LruMetricsSnapshot {
            get_hits: 10,
            evicted_entries: 20,
            cache_len: 30,
            capacity: 40,
            ..Default::default()
        };
        let sum = a.merge(b);
        assert_eq!(sum.get_hits, 11);
        assert_eq!(sum.evicted_entries, 22);
        assert_eq!(sum.cache_len, 33);
        assert_eq!(sum.capacity, 44);
    }
}
