//! Feature-gated cache metrics (`--features metrics`).
//!
//! Recording, snapshotting and exporting are split across small traits:
//! policy cores write counters through the recorder traits, callers read a
//! [`LruMetricsSnapshot`](snapshot::LruMetricsSnapshot) through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider), and an
//! exporter such as [`PrometheusTextExporter`](exporter::PrometheusTextExporter)
//! publishes it.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
