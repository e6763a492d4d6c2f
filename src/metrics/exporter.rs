use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::DepqMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for queue metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
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

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<DepqMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &DepqMetricsSnapshot) {
        let counters = [
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_front_fast_path_total", snapshot.insert_front_fast_path),
            ("insert_back_fast_path_total", snapshot.insert_back_fast_path),
            ("search_calls_total", snapshot.search_calls),
            ("search_probes_total", snapshot.search_probes),
            ("search_travel_total", snapshot.search_travel),
            ("search_scan_steps_total", snapshot.search_scan_steps),
            ("placement_shifts_total", snapshot.placement_shifts),
            ("add_first_calls_total", snapshot.add_first_calls),
            ("add_last_calls_total", snapshot.add_last_calls),
            ("invalid_priority_total", snapshot.invalid_priority),
            ("pop_first_calls_total", snapshot.pop_first_calls),
            ("pop_last_calls_total", snapshot.pop_last_calls),
            ("pop_empty_total", snapshot.pop_empty),
            ("remove_calls_total", snapshot.remove_calls),
            ("removed_entries_total", snapshot.removed_entries),
            ("overflow_evictions_total", snapshot.overflow_evictions),
            ("clear_calls_total", snapshot.clear_calls),
            ("peek_calls_total", snapshot.peek_calls),
            ("peek_empty_total", snapshot.peek_empty),
            ("count_calls_total", snapshot.count_calls),
            ("count_hits_total", snapshot.count_hits),
            ("get_calls_total", snapshot.get_calls),
            ("get_out_of_range_total", snapshot.get_out_of_range),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }

        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(
            &self.metric_name("distinct_keys"),
            snapshot.distinct_keys as u64,
        );
        if let Some(max_len) = snapshot.max_len {
            self.write_gauge(&self.metric_name("max_len"), max_len as u64);
        }
    }
}
