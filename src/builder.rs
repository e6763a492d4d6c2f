//! Builder for configured queues.
//!
//! Collects the default priority, an optional length bound and a capacity
//! hint, then produces either a locked [`Depq`] or a single-threaded
//! [`DepqCore`].
//!
//! ## Example
//!
//! ```rust
//! use depq::builder::DepqBuilder;
//! use depq::Depq;
//!
//! let queue: Depq<&str, u32> = DepqBuilder::new(10).max_len(2).build();
//! queue.insert("a", 3);
//! queue.insert("b", 1);
//! assert_eq!(queue.insert("c", 2), Some(("b", 1)));
//! assert_eq!(queue.len(), 2);
//! ```

use crate::depq::{Depq, DepqCore};
use crate::traits::KeyPolicy;

/// Queue configuration.
#[derive(Debug, Clone)]
pub struct DepqBuilder<P> {
    start: P,
    max_len: Option<usize>,
    capacity: usize,
}

impl<P> DepqBuilder<P>
where
    P: PartialOrd + Clone,
{
    /// Starts a builder with the given default priority.
    pub fn new(start: P) -> Self {
        Self {
            start,
            max_len: None,
            capacity: 0,
        }
    }

    /// Replaces the default priority.
    pub fn start(mut self, start: P) -> Self {
        self.start = start;
        self
    }

    /// Bounds the queue; inserts past the bound evict the lowest entry.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Preallocates room for `capacity` entries (never more than `max_len`).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds an empty single-threaded queue.
    pub fn build_core<T, K>(self) -> DepqCore<T, P, K>
    where
        K: KeyPolicy<T>,
    {
        let capacity = match self.max_len {
            Some(max_len) => self.capacity.min(max_len),
            None => self.capacity,
        };
        let mut core = DepqCore::with_capacity(capacity, self.start);
        core.set_max_len(self.max_len);
        core
    }

    /// Builds an empty locked queue.
    pub fn build<T, K>(self) -> Depq<T, P, K>
    where
        K: KeyPolicy<T>,
    {
        Depq::from_core(self.build_core())
    }

    /// Builds a single-threaded queue from pairs in any order.
    ///
    /// When a bound is set, only the `max_len` highest-priority pairs are kept.
    pub fn build_core_from<T, K, I>(self, pairs: I) -> DepqCore<T, P, K>
    where
        K: KeyPolicy<T>,
        I: IntoIterator<Item = (T, P)>,
    {
        DepqCore::assemble(pairs.into_iter().collect(), self.start, self.max_len)
    }

    /// Builds a locked queue from pairs in any order.
    pub fn build_from<T, K, I>(self, pairs: I) -> Depq<T, P, K>
    where
        K: KeyPolicy<T>,
        I: IntoIterator<Item = (T, P)>,
    {
        Depq::from_core(self.build_core_from(pairs))
    }
}

impl<P> Default for DepqBuilder<P>
where
    P: PartialOrd + Clone + Default,
{
    fn default() -> Self {
        Self::new(P::default())
    }
}
