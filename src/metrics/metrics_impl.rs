use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{DepqMetricsReadRecorder, DepqMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct DepqMetrics {
    pub insert_calls: u64,
    pub insert_front_fast_path: u64,
    pub insert_back_fast_path: u64,
    pub search_calls: u64,
    pub search_probes: u64,
    pub search_travel: u64,
    pub search_scan_steps: u64,
    pub placement_shifts: u64,
    pub add_first_calls: u64,
    pub add_last_calls: u64,
    pub invalid_priority: u64,
    pub pop_first_calls: u64,
    pub pop_last_calls: u64,
    pub pop_empty: u64,
    pub remove_calls: u64,
    pub removed_entries: u64,
    pub overflow_evictions: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_empty: MetricsCell,
    pub count_calls: MetricsCell,
    pub count_hits: MetricsCell,
    pub get_calls: MetricsCell,
    pub get_out_of_range: MetricsCell,
}

impl DepqMetricsRecorder for DepqMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_front_fast_path(&mut self) {
        self.insert_front_fast_path += 1;
    }

    fn record_insert_back_fast_path(&mut self) {
        self.insert_back_fast_path += 1;
    }

    fn record_search(&mut self, probes: u64, travelled: u64, scan_steps: u64) {
        self.search_calls += 1;
        self.search_probes += probes;
        self.search_travel += travelled;
        self.search_scan_steps += scan_steps;
    }

    fn record_placement_shift(&mut self, shifted: u64) {
        self.placement_shifts += shifted;
    }

    fn record_add_first(&mut self) {
        self.add_first_calls += 1;
    }

    fn record_add_last(&mut self) {
        self.add_last_calls += 1;
    }

    fn record_invalid_priority(&mut self) {
        self.invalid_priority += 1;
    }

    fn record_pop_first(&mut self) {
        self.pop_first_calls += 1;
    }

    fn record_pop_last(&mut self) {
        self.pop_last_calls += 1;
    }

    fn record_pop_empty(&mut self) {
        self.pop_empty += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_removed_entries(&mut self, removed: u64) {
        self.removed_entries += removed;
    }

    fn record_overflow_eviction(&mut self) {
        self.overflow_evictions += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl DepqMetricsReadRecorder for DepqMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_empty(&self) {
        self.peek_empty.incr();
    }

    fn record_count_call(&self) {
        self.count_calls.incr();
    }

    fn record_count_hit(&self) {
        self.count_hits.incr();
    }

    fn record_get_call(&self) {
        self.get_calls.incr();
    }

    fn record_get_out_of_range(&self) {
        self.get_out_of_range.incr();
    }
}
