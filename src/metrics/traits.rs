//! # Metrics Trait Hierarchy
//!
//! ```text
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │ DepqMetricsRecorder (&mut)   │   │ DepqMetricsReadRecorder (&)  │
//!   │ insert/pop/remove/clear      │   │ peek/count/get               │
//!   └──────────────┬───────────────┘   └──────────────┬───────────────┘
//!                  └───────────────┬──────────────────┘
//!                                  ▼
//!                          DepqMetrics (counters)
//!                                  │
//!            ┌─────────────────────┴─────────────────────┐
//!            ▼                                           ▼
//!   MetricsSnapshotProvider<S>                  MetricsExporter<S>
//!   (bench/test)                                (production monitoring)
//! ```

/// Counters written by mutating queue operations.
pub trait DepqMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_front_fast_path(&mut self);
    fn record_insert_back_fast_path(&mut self);
    /// One rotation-aware search with its probe/travel/scan totals.
    fn record_search(&mut self, probes: u64, travelled: u64, scan_steps: u64);
    fn record_placement_shift(&mut self, shifted: u64);
    fn record_add_first(&mut self);
    fn record_add_last(&mut self);
    fn record_invalid_priority(&mut self);
    fn record_pop_first(&mut self);
    fn record_pop_last(&mut self);
    fn record_pop_empty(&mut self);
    fn record_remove_call(&mut self);
    fn record_removed_entries(&mut self, removed: u64);
    fn record_overflow_eviction(&mut self);
    fn record_clear(&mut self);
}

/// Counters written by `&self` queue operations (interior mutability).
pub trait DepqMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_empty(&self);
    fn record_count_call(&self);
    fn record_count_hit(&self);
    fn record_get_call(&self);
    fn record_get_out_of_range(&self);
}

/// Take a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
