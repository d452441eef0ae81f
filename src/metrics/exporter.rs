use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write failures are
/// dropped: metrics never fail a cache operation.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {name} {kind}");
        let _ = writeln!(writer, "{name} {value}");
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", &self.metric_name(suffix), value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.counter("get_calls_total", snapshot.get_calls);
        self.counter("get_hits_total", snapshot.get_hits);
        self.counter("get_misses_total", snapshot.get_misses);
        self.counter("insert_calls_total", snapshot.insert_calls);
        self.counter("insert_updates_total", snapshot.insert_updates);
        self.counter("insert_new_total", snapshot.insert_new);
        self.counter("insert_rejected_total", snapshot.insert_rejected);
        self.counter("evict_calls_total", snapshot.evict_calls);
        self.counter("evicted_entries_total", snapshot.evicted_entries);
        self.counter("remove_calls_total", snapshot.remove_calls);
        self.counter("remove_found_total", snapshot.remove_found);
        self.counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.counter("touch_calls_total", snapshot.touch_calls);
        self.counter("touch_found_total", snapshot.touch_found);
        self.counter("clear_calls_total", snapshot.clear_calls);
        self.gauge("cache_len", snapshot.cache_len);
        self.gauge("capacity", snapshot.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("lru", Vec::new());
        let snap = LruMetricsSnapshot {
            get_calls: 5,
            get_hits: 3,
            cache_len: 2,
            capacity: 8,
            ..Default::default()
        };
        exporter.export(&snap);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE lru_get_calls_total counter\nlru_get_calls_total 5\n"));
        assert!(text.contains("lru_get_hits_total 3\n"));
        assert!(text.contains("# TYPE lru_cache_len gauge\nlru_cache_len 2\n"));
        assert!(text.contains("lru_capacity 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&LruMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(
            text.contains("\nget_calls_total 0\n") || text.starts_with("# TYPE get_calls_total")
        );
        assert!(!text.contains("_get_calls_total"));
    }
}
