use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder};

/// Live counters owned by an `LruCore`; mutated only under the cache lock.
#[derive(Debug, Default, Clone)]
pub struct LruMetrics {
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
}

impl LruMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_counters_split_hits_and_misses() {
        let mut m = LruMetrics::new();
        m.record_get_hit();
        m.record_get_hit();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 2);
        assert_eq!(m.get_misses, 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut m = LruMetrics::new();
        m.record_insert_call();
        m.record_evicted_entry();
        m.record_touch_found();
        m.reset();
        assert_eq!(m.insert_calls, 0);
        assert_eq!(m.evicted_entries, 0);
        assert_eq!(m.touch_found, 0);
    }
}
