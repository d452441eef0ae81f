//! # Metrics Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   get hit/miss, insert, evict, clear
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   rejected inserts, remove, pop, touch
//!   └─────────────────────────────┘
//!
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders only write counters; providers only read; exporters only publish.

/// Counters shared by every policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-policy counters.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    /// A new key was dropped because the cache has zero capacity.
    fn record_insert_rejected(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring sink.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
