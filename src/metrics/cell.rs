use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter usable through `&self`.
///
/// Read paths of the queue (`count`, peeks, indexed access) take `&self`, so
/// their counters need interior mutability. Relaxed ordering is enough: the
/// owning queue is already serialized by its lock and counters never feed
/// back into queue behavior.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

impl Clone for MetricsCell {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_counts_and_resets() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
        assert_eq!(cell.clone().get(), 2);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
