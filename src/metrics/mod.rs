//! Operation counters for queue instrumentation (feature `metrics`).
//!
//! Recording, snapshotting and export are split into separate traits so the
//! queue only ever writes counters; benches and tests read them through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider) and production
//! monitoring publishes them through a [`MetricsExporter`](traits::MetricsExporter).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
