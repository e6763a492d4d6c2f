#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DepqMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_front_fast_path: u64,
    pub insert_back_fast_path: u64,
    pub search_calls: u64,
    pub search_probes: u64,
    pub search_travel: u64, // total cursor rotation distance
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

    pub peek_calls: u64,
    pub peek_empty: u64,
    pub count_calls: u64,
    pub count_hits: u64,
    pub get_calls: u64,
    pub get_out_of_range: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub distinct_keys: usize,
    pub max_len: Option<usize>,
}
