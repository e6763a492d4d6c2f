//! # Double-Ended Priority Queue
//!
//! Ordered `(item, priority)` pairs with O(1) access and removal at both the
//! highest- and lowest-priority ends, O(1) membership and frequency queries,
//! and rotation-aware insertion for arbitrary priorities.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │                              Depq<T, P, K>                                 │
//! │                                                                            │
//! │   ┌────────────────────────────────────────────────────────────────────┐   │
//! │   │                 Mutex<DepqCore<T, P, K>>                           │   │
//! │   │                                                                    │   │
//! │   │   entries: RotatingDeque<(T, P)>        index: FrequencyIndex      │   │
//! │   │                                                                    │   │
//! │   │   high ─► [(A,5)] [(B,3)] [(C,3)] [(D,1)] ◄─ low      A → 1        │   │
//! │   │             0       1       2       3                 B → 1        │   │
//! │   │                                                       C → 1        │   │
//! │   │   start: P (default priority)                         D → 1        │   │
//! │   │   max_len: Option<usize>                                           │   │
//! │   └────────────────────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insertion Flow
//!
//! ```text
//!   insert(item, p)
//!        │
//!        ▼
//!   empty or p > high ──────────────► push_front          O(1)
//!   p <= low ───────────────────────► push_back           O(1)
//!   otherwise
//!        │
//!        ▼
//!   partition_point_rotating(|e| e.p >= p)   probes move a rotation cursor,
//!        │                                    linear scan once window <= 10
//!        ▼
//!   insert_rotating(idx)                     rotate from the closer end,
//!        │                                    push, rotate back
//!        ▼
//!   index.increment(key(item)); evict lowest if len > max_len
//! ```
//!
//! ## Ordering Rules
//!
//! - Entries are non-increasing by priority from front to back.
//! - Equal priorities keep insertion order: `insert` and `add_last` place a
//!   new entry after existing equals, `add_first` places it before them.
//!
//! ## Performance Characteristics
//!
//! | Operation                    | Time             | Notes                          |
//! |------------------------------|------------------|--------------------------------|
//! | `add_first` / `add_last`     | O(1)             | Bound-checked end insertion    |
//! | `insert`                     | O(1) ends, O(n)  | Low-constant rotation search   |
//! | `pop_first` / `pop_last`     | O(1)             |                                |
//! | `first`/`last`/`high`/`low`  | O(1)             |                                |
//! | `get`                        | O(1)             |                                |
//! | `count` / `contains`         | O(1)             | Frequency index lookup         |
//! | `remove` / `elim`            | O(n)             | Scans from the low end         |
//! | `clear`                      | O(n) drop        |                                |
//!
//! ## Thread Safety
//!
//! - [`DepqCore`]: not synchronized, `&mut self` for mutation.
//! - [`Depq`]: every operation holds one `parking_lot::Mutex` for its whole
//!   duration. Share it with `Arc<Depq<..>>`.
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::ds::frequency_index::FrequencyIndex;
use crate::ds::rotating_deque::RotatingDeque;
use crate::error::{DepqError, InvariantError};
use crate::export::Snapshot;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::DepqMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::DepqMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    DepqMetricsReadRecorder, DepqMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};
use crate::traits::{ByValue, KeyPolicy};

/// Where a new entry lands relative to the current ends.
enum Placement {
    Front,
    Back,
    Search,
}

/// Single-threaded double-ended priority queue.
///
/// Holds the ordered entries and the frequency index. [`Depq`] wraps it in a
/// lock; use `DepqCore` directly when the queue is owned by one thread.
///
/// # Example
///
/// ```
/// use depq::DepqCore;
///
/// let mut queue: DepqCore<&str, i32> = DepqCore::new();
/// queue.insert("a", 5);
/// queue.insert("b", 3);
/// queue.insert("c", 3);
/// queue.insert("d", 1);
///
/// assert_eq!(queue.high(), Ok(&5));
/// assert_eq!(queue.low(), Ok(&1));
/// assert_eq!(queue.get(2), Ok((&"c", &3)));
/// assert_eq!(queue.pop_first(), Ok(("a", 5)));
/// ```
pub struct DepqCore<T, P, K = ByValue>
where
    K: KeyPolicy<T>,
{
    entries: RotatingDeque<(T, P)>,
    index: FrequencyIndex<K::Key>,
    start: P,
    max_len: Option<usize>,
    #[cfg(feature = "metrics")]
    metrics: DepqMetrics,
    _policy: PhantomData<fn() -> K>,
}

impl<T, P, K> DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone,
{
    /// Creates an empty queue whose default priority is `P::default()`.
    pub fn new() -> Self
    where
        P: Default,
    {
        Self::with_start(P::default())
    }

    /// Creates an empty queue with the given default priority.
    pub fn with_start(start: P) -> Self {
        Self::with_capacity(0, start)
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, start: P) -> Self {
        Self {
            entries: RotatingDeque::with_capacity(capacity),
            index: FrequencyIndex::with_capacity(capacity),
            start,
            max_len: None,
            #[cfg(feature = "metrics")]
            metrics: DepqMetrics::default(),
            _policy: PhantomData,
        }
    }

    /// Builds a queue from pairs in any order.
    ///
    /// Pairs are stable-sorted by descending priority, so pairs with equal
    /// priority keep their input order. Input that is already non-increasing
    /// skips the sort.
    ///
    /// ```
    /// use depq::DepqCore;
    ///
    /// let queue: DepqCore<char, u8> = DepqCore::from_pairs([('b', 1), ('a', 9), ('c', 1)], 0);
    /// assert_eq!(queue.to_vec(), vec![('a', 9), ('b', 1), ('c', 1)]);
    /// assert_eq!(queue.count(&'b'), 1);
    /// ```
    pub fn from_pairs<I>(pairs: I, start: P) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
    {
        Self::assemble(pairs.into_iter().collect(), start, None)
    }

    /// Sorts `pairs`, trims them to `max_len`, and rebuilds the index in one scan.
    pub(crate) fn assemble(mut pairs: Vec<(T, P)>, start: P, max_len: Option<usize>) -> Self {
        let sorted = pairs.windows(2).all(|pair| pair[0].1 >= pair[1].1);
        if !sorted {
            pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        }
        if let Some(max_len) = max_len
            && pairs.len() > max_len
        {
            debug!(
                dropped = pairs.len() - max_len,
                max_len, "bulk construction truncated to max_len"
            );
            pairs.truncate(max_len);
        }

        let mut index = FrequencyIndex::with_capacity(pairs.len());
        for (item, _) in &pairs {
            K::with_key(item, |key| index.increment(key));
        }
        debug!(len = pairs.len(), presorted = sorted, "depq built from pairs");

        Self {
            entries: RotatingDeque::from_vec(pairs),
            index,
            start,
            max_len,
            #[cfg(feature = "metrics")]
            metrics: DepqMetrics::default(),
            _policy: PhantomData,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the default priority.
    pub fn start(&self) -> &P {
        &self.start
    }

    /// Replaces the default priority. Existing entries are not touched.
    pub fn set_start(&mut self, start: P) {
        self.start = start;
    }

    /// Returns the length bound, if any.
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Sets or clears the length bound.
    ///
    /// A bound below the current length evicts lowest-priority entries
    /// immediately; they are returned lowest first.
    pub fn set_max_len(&mut self, max_len: Option<usize>) -> Vec<(T, P)> {
        self.max_len = max_len;
        let mut evicted = Vec::new();
        while let Some(entry) = self.evict_overflow() {
            evicted.push(entry);
        }
        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), ?max_len, "max_len lowered, entries evicted");
        }
        evicted
    }

    /// Adds `item` as the highest-priority entry.
    ///
    /// With `priority` omitted the entry takes the current highest priority,
    /// or the default priority when the queue is empty. A supplied priority
    /// below the current highest fails with [`DepqError::InvalidPriority`].
    ///
    /// Returns the entry evicted by the length bound, if any.
    pub fn add_first(&mut self, item: T, priority: Option<P>) -> Result<Option<(T, P)>, DepqError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_first();

        let resolved = match (self.entries.front(), priority) {
            (None, None) => Some(self.start.clone()),
            (None, Some(priority)) => Some(priority),
            (Some((_, high)), None) => Some(high.clone()),
            (Some((_, high)), Some(priority)) => match priority.partial_cmp(high) {
                Some(Ordering::Greater | Ordering::Equal) => Some(priority),
                _ => None,
            },
        };
        let Some(priority) = resolved else {
            return Err(self.invalid_priority());
        };

        self.track(&item);
        self.entries.push_front((item, priority));
        Ok(self.evict_overflow())
    }

    /// Adds `item` as the lowest-priority entry.
    ///
    /// Mirror of [`add_first`](Self::add_first): a supplied priority must not
    /// exceed the current lowest.
    pub fn add_last(&mut self, item: T, priority: Option<P>) -> Result<Option<(T, P)>, DepqError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_last();

        let resolved = match (self.entries.back(), priority) {
            (None, None) => Some(self.start.clone()),
            (None, Some(priority)) => Some(priority),
            (Some((_, low)), None) => Some(low.clone()),
            (Some((_, low)), Some(priority)) => match priority.partial_cmp(low) {
                Some(Ordering::Less | Ordering::Equal) => Some(priority),
                _ => None,
            },
        };
        let Some(priority) = resolved else {
            return Err(self.invalid_priority());
        };

        self.track(&item);
        self.entries.push_back((item, priority));
        Ok(self.evict_overflow())
    }

    /// Inserts `item` at the position its priority dictates.
    ///
    /// Entries with an equal priority stay ahead of the new one. Returns the
    /// entry evicted by the length bound, if any.
    pub fn insert(&mut self, item: T, priority: P) -> Option<(T, P)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let placement = match (self.entries.front(), self.entries.back()) {
            (Some((_, high)), Some((_, low))) => {
                if priority > *high {
                    Placement::Front
                } else if priority <= *low {
                    Placement::Back
                } else {
                    Placement::Search
                }
            },
            _ => Placement::Front,
        };

        self.track(&item);
        match placement {
            Placement::Front => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_front_fast_path();
                self.entries.push_front((item, priority));
            },
            Placement::Back => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_back_fast_path();
                self.entries.push_back((item, priority));
            },
            Placement::Search => {
                let (index, stats) = self
                    .entries
                    .partition_point_rotating(|(_, existing)| *existing >= priority);
                let shifted = self.entries.insert_rotating(index, (item, priority));
                trace!(
                    index,
                    probes = stats.probes,
                    travelled = stats.travelled,
                    scan_steps = stats.scan_steps,
                    shifted,
                    "rotation-aware insert"
                );
                #[cfg(feature = "metrics")]
                {
                    self.metrics
                        .record_search(stats.probes, stats.travelled, stats.scan_steps);
                    self.metrics.record_placement_shift(shifted as u64);
                }
            },
        }

        self.evict_overflow()
    }

    /// Removes and returns the highest-priority entry.
    pub fn pop_first(&mut self) -> Result<(T, P), DepqError> {
        let Some((item, priority)) = self.entries.pop_front() else {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();
            return Err(DepqError::EmptyQueue);
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_first();
        self.forget(&item);
        Ok((item, priority))
    }

    /// Removes and returns the lowest-priority entry.
    pub fn pop_last(&mut self) -> Result<(T, P), DepqError> {
        let Some((item, priority)) = self.entries.pop_back() else {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();
            return Err(DepqError::EmptyQueue);
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_last();
        self.forget(&item);
        Ok((item, priority))
    }

    /// Returns the highest-priority entry without removing it.
    pub fn peek_first(&self) -> Result<(&T, &P), DepqError> {
        self.peek(self.entries.front())
    }

    /// Returns the lowest-priority entry without removing it.
    pub fn peek_last(&self) -> Result<(&T, &P), DepqError> {
        self.peek(self.entries.back())
    }

    /// Returns the highest-priority item.
    pub fn first(&self) -> Result<&T, DepqError> {
        self.peek_first().map(|(item, _)| item)
    }

    /// Returns the lowest-priority item.
    pub fn last(&self) -> Result<&T, DepqError> {
        self.peek_last().map(|(item, _)| item)
    }

    /// Returns the highest priority.
    pub fn high(&self) -> Result<&P, DepqError> {
        self.peek_first().map(|(_, priority)| priority)
    }

    /// Returns the lowest priority.
    pub fn low(&self) -> Result<&P, DepqError> {
        self.peek_last().map(|(_, priority)| priority)
    }

    /// Returns the entry at `index` (0 = highest priority).
    pub fn get(&self, index: usize) -> Result<(&T, &P), DepqError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_call();
        match self.entries.get(index) {
            Some((item, priority)) => Ok((item, priority)),
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_out_of_range();
                Err(DepqError::IndexOutOfRange {
                    index,
                    len: self.entries.len(),
                })
            },
        }
    }

    /// Number of entries whose key matches `item`'s.
    pub fn count(&self, item: &T) -> usize {
        let count = K::with_key(item, |key| self.index.count(key));
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_count_call();
            if count > 0 {
                self.metrics.record_count_hit();
            }
        }
        count
    }

    /// Returns `true` if at least one entry matches `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.count(item) > 0
    }

    /// Number of distinct lookup keys present.
    pub fn distinct_len(&self) -> usize {
        self.index.len()
    }

    /// Removes up to `count` entries matching `item`, lowest priority first.
    ///
    /// A negative `count` removes every match. Returns the removed pairs in
    /// ascending priority order; finding fewer matches than `count` is not an
    /// error.
    ///
    /// ```
    /// use depq::DepqCore;
    ///
    /// let mut queue: DepqCore<char, i32> = DepqCore::from_pairs([('z', 1), ('z', 4), ('z', 7)], 0);
    /// assert_eq!(queue.remove(&'z', 2), vec![('z', 1), ('z', 4)]);
    /// assert_eq!(queue.to_vec(), vec![('z', 7)]);
    /// ```
    pub fn remove(&mut self, item: &T, count: isize) -> Vec<(T, P)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        if count == 0 || K::with_key(item, |key| !self.index.contains(key)) {
            return Vec::new();
        }

        let limit = usize::try_from(count).ok();
        let target = K::key_of(item);
        let removed = self.entries.remove_from_back_where(limit, |(entry, _)| {
            K::with_key(entry, |key| *key == target)
        });
        for (entry, _) in &removed {
            self.forget(entry);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_removed_entries(removed.len() as u64);
        removed
    }

    /// Removes every entry matching `item`, lowest priority first.
    pub fn elim(&mut self, item: &T) -> Vec<(T, P)> {
        self.remove(item, -1)
    }

    /// Swaps the lowest-priority occurrence of `old` for `new`.
    ///
    /// `new` is inserted with the priority `old` had, after any existing
    /// entries of that priority. Returns that priority, or `None` (and changes
    /// nothing) if `old` is absent.
    pub fn replace(&mut self, old: &T, new: T) -> Option<P> {
        let (_, priority) = self.remove(old, 1).into_iter().next()?;
        self.insert(new, priority.clone());
        Some(priority)
    }

    /// Moves the lowest-priority occurrence of `item` to `priority`.
    ///
    /// The item is inserted even if it was absent. Returns its previous
    /// priority, if it had one.
    pub fn set_priority(&mut self, item: T, priority: P) -> Option<P> {
        let previous = self
            .remove(&item, 1)
            .into_iter()
            .next()
            .map(|(_, priority)| priority);
        self.insert(item, priority);
        previous
    }

    /// Positional deletion is not offered; entries are removed by item.
    ///
    /// Always fails with [`DepqError::UnsupportedOperation`].
    pub fn remove_at(&mut self, _index: usize) -> Result<(T, P), DepqError> {
        Err(DepqError::UnsupportedOperation(
            "entries cannot be deleted by index; use remove(item, count)",
        ))
    }

    /// Drops every entry and every count.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates entries from highest to lowest priority.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&T, &P)> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(item, priority)| (item, priority))
    }

    /// Copies the entries, highest priority first.
    pub fn to_vec(&self) -> Vec<(T, P)>
    where
        T: Clone,
    {
        self.entries.iter().cloned().collect()
    }

    /// Exports the entries and default priority.
    pub fn snapshot(&self) -> Snapshot<T, P>
    where
        T: Clone,
    {
        Snapshot {
            entries: self.to_vec(),
            start: self.start.clone(),
        }
    }

    /// Consumes the queue into its exported form.
    pub fn into_snapshot(self) -> Snapshot<T, P> {
        Snapshot {
            entries: self.entries.into_iter().collect(),
            start: self.start,
        }
    }

    /// Verifies ordering, frequency-index consistency and the length bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let pairs = self.entries.iter().zip(self.entries.iter().skip(1));
        for (position, (ahead, behind)) in pairs.enumerate() {
            if matches!(ahead.1.partial_cmp(&behind.1), Some(Ordering::Less) | None) {
                return Err(InvariantError::new(format!(
                    "entries out of order at index {}",
                    position
                )));
            }
        }

        if self.index.total() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "frequency total {} does not match {} entries",
                self.index.total(),
                self.entries.len()
            )));
        }

        let recounted: FrequencyIndex<K::Key> =
            self.entries.iter().map(|(item, _)| K::key_of(item)).collect();
        if recounted.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "{} distinct keys indexed, {} present",
                self.index.len(),
                recounted.len()
            )));
        }
        if recounted
            .iter()
            .any(|(key, count)| self.index.count(key) != count)
        {
            return Err(InvariantError::new("frequency index count mismatch"));
        }

        if let Some(max_len) = self.max_len
            && self.entries.len() > max_len
        {
            return Err(InvariantError::new(format!(
                "len {} exceeds max_len {}",
                self.entries.len(),
                max_len
            )));
        }
        Ok(())
    }

    /// Returns the operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> &DepqMetrics {
        &self.metrics
    }

    /// Resets the operation counters to zero.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.metrics = DepqMetrics::default();
    }

    fn peek<'a>(&self, entry: Option<&'a (T, P)>) -> Result<(&'a T, &'a P), DepqError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();
        match entry {
            Some((item, priority)) => Ok((item, priority)),
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_peek_empty();
                Err(DepqError::EmptyQueue)
            },
        }
    }

    fn invalid_priority(&mut self) -> DepqError {
        #[cfg(feature = "metrics")]
        self.metrics.record_invalid_priority();
        DepqError::InvalidPriority
    }

    fn track(&mut self, item: &T) {
        K::with_key(item, |key| self.index.increment(key));
    }

    fn forget(&mut self, item: &T) {
        K::with_key(item, |key| self.index.decrement(key));
    }

    /// Drops the lowest entry if the length bound is exceeded.
    fn evict_overflow(&mut self) -> Option<(T, P)> {
        let max_len = self.max_len?;
        if self.entries.len() <= max_len {
            return None;
        }
        let (item, priority) = self.entries.pop_back()?;
        self.forget(&item);
        #[cfg(feature = "metrics")]
        self.metrics.record_overflow_eviction();
        trace!(max_len, "lowest entry evicted by max_len");
        Some((item, priority))
    }
}

impl<T, P, K> Default for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, K> Clone for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    T: Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            start: self.start.clone(),
            max_len: self.max_len,
            #[cfg(feature = "metrics")]
            metrics: self.metrics.clone(),
            _policy: PhantomData,
        }
    }
}

impl<T, P, K> fmt::Debug for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    T: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepqCore")
            .field("entries", &DebugEntries(&self.entries))
            .field("start", &self.start)
            .field("max_len", &self.max_len)
            .finish()
    }
}

/// Renders entries as `[(item, priority), ...]`.
impl<T, P, K> fmt::Display for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    T: fmt::Display,
    P: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, (item, priority)) in self.entries.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", item, priority)?;
        }
        f.write_str("]")
    }
}

/// Queues are equal when their entry sequences are equal in order;
/// the default priority and length bound are not compared.
impl<T, P, K> PartialEq for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    T: PartialEq,
    P: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T, P, K> FromIterator<(T, P)> for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        Self::from_pairs(iter, P::default())
    }
}

impl<T, P, K> Extend<(T, P)> for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone,
{
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.insert(item, priority);
        }
    }
}

impl<T, P, K> IntoIterator for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
{
    type Item = (T, P);
    type IntoIter = std::collections::vec_deque::IntoIter<(T, P)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(feature = "metrics")]
impl<T, P, K> MetricsSnapshotProvider<DepqMetricsSnapshot> for DepqCore<T, P, K>
where
    K: KeyPolicy<T>,
{
    fn snapshot(&self) -> DepqMetricsSnapshot {
        let m = &self.metrics;
        DepqMetricsSnapshot {
            insert_calls: m.insert_calls,
            insert_front_fast_path: m.insert_front_fast_path,
            insert_back_fast_path: m.insert_back_fast_path,
            search_calls: m.search_calls,
            search_probes: m.search_probes,
            search_travel: m.search_travel,
            search_scan_steps: m.search_scan_steps,
            placement_shifts: m.placement_shifts,
            add_first_calls: m.add_first_calls,
            add_last_calls: m.add_last_calls,
            invalid_priority: m.invalid_priority,
            pop_first_calls: m.pop_first_calls,
            pop_last_calls: m.pop_last_calls,
            pop_empty: m.pop_empty,
            remove_calls: m.remove_calls,
            removed_entries: m.removed_entries,
            overflow_evictions: m.overflow_evictions,
            clear_calls: m.clear_calls,
            peek_calls: m.peek_calls.get(),
            peek_empty: m.peek_empty.get(),
            count_calls: m.count_calls.get(),
            count_hits: m.count_hits.get(),
            get_calls: m.get_calls.get(),
            get_out_of_range: m.get_out_of_range.get(),
            len: self.entries.len(),
            distinct_keys: self.index.len(),
            max_len: self.max_len,
        }
    }
}

struct DebugEntries<'a, T, P>(&'a RotatingDeque<(T, P)>);

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for DebugEntries<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

// ---------------------------------------------------------------------------
// Depq (locked)
// ---------------------------------------------------------------------------

/// Thread-safe double-ended priority queue.
///
/// Every method takes the single internal lock for its whole duration, so
/// operations are fully serialized and never observe a half-finished insert
/// or removal. The lock guard is released on every return path, errors
/// included. Peeks return clones because a reference cannot outlive the lock;
/// use [`read_with`](Depq::read_with) to inspect without cloning.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use depq::Depq;
///
/// let queue: Arc<Depq<u32, u32>> = Arc::new(Depq::new());
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let queue = Arc::clone(&queue);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 queue.insert(t * 100 + i, i);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(queue.len(), 400);
/// assert_eq!(queue.high(), Ok(99));
/// assert!(queue.check_invariants().is_ok());
/// ```
pub struct Depq<T, P, K = ByValue>
where
    K: KeyPolicy<T>,
{
    inner: Mutex<DepqCore<T, P, K>>,
}

impl<T, P, K> Depq<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone,
{
    /// Creates an empty queue whose default priority is `P::default()`.
    pub fn new() -> Self
    where
        P: Default,
    {
        Self::from_core(DepqCore::new())
    }

    /// Creates an empty queue with the given default priority.
    pub fn with_start(start: P) -> Self {
        Self::from_core(DepqCore::with_start(start))
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, start: P) -> Self {
        Self::from_core(DepqCore::with_capacity(capacity, start))
    }

    /// Builds a queue from pairs in any order; see [`DepqCore::from_pairs`].
    pub fn from_pairs<I>(pairs: I, start: P) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
    {
        Self::from_core(DepqCore::from_pairs(pairs, start))
    }

    /// Wraps an existing single-threaded queue.
    pub fn from_core(core: DepqCore<T, P, K>) -> Self {
        Self {
            inner: Mutex::new(core),
        }
    }

    /// Unwraps into the single-threaded queue.
    pub fn into_core(self) -> DepqCore<T, P, K> {
        self.inner.into_inner()
    }

    /// Runs `f` against the queue while holding the lock.
    ///
    /// The closure must not call back into this `Depq`; the lock is not
    /// reentrant.
    pub fn read_with<R>(&self, f: impl FnOnce(&DepqCore<T, P, K>) -> R) -> R {
        let core = self.inner.lock();
        f(&core)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a copy of the default priority.
    pub fn start(&self) -> P {
        self.inner.lock().start().clone()
    }

    /// Replaces the default priority. Existing entries are not touched.
    pub fn set_start(&self, start: P) {
        self.inner.lock().set_start(start);
    }

    pub fn max_len(&self) -> Option<usize> {
        self.inner.lock().max_len()
    }

    /// Sets or clears the length bound; see [`DepqCore::set_max_len`].
    pub fn set_max_len(&self, max_len: Option<usize>) -> Vec<(T, P)> {
        self.inner.lock().set_max_len(max_len)
    }

    /// Adds `item` as the highest-priority entry; see [`DepqCore::add_first`].
    ///
    /// ```
    /// use depq::Depq;
    /// use depq::error::DepqError;
    ///
    /// let queue: Depq<char, i32> = Depq::new();
    /// queue.add_first('x', None).unwrap();
    /// assert_eq!(queue.to_vec(), vec![('x', 0)]);
    /// assert_eq!(queue.add_first('y', Some(-1)), Err(DepqError::InvalidPriority));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn add_first(&self, item: T, priority: Option<P>) -> Result<Option<(T, P)>, DepqError> {
        self.inner.lock().add_first(item, priority)
    }

    /// Adds `item` as the lowest-priority entry; see [`DepqCore::add_last`].
    pub fn add_last(&self, item: T, priority: Option<P>) -> Result<Option<(T, P)>, DepqError> {
        self.inner.lock().add_last(item, priority)
    }

    /// Inserts `item` in priority order; see [`DepqCore::insert`].
    pub fn insert(&self, item: T, priority: P) -> Option<(T, P)> {
        self.inner.lock().insert(item, priority)
    }

    pub fn pop_first(&self) -> Result<(T, P), DepqError> {
        self.inner.lock().pop_first()
    }

    pub fn pop_last(&self) -> Result<(T, P), DepqError> {
        self.inner.lock().pop_last()
    }

    /// Pops the highest entry unless the lock is currently held elsewhere.
    pub fn try_pop_first(&self) -> Option<Result<(T, P), DepqError>> {
        let mut core = self.inner.try_lock()?;
        Some(core.pop_first())
    }

    /// Pops the lowest entry unless the lock is currently held elsewhere.
    pub fn try_pop_last(&self) -> Option<Result<(T, P), DepqError>> {
        let mut core = self.inner.try_lock()?;
        Some(core.pop_last())
    }

    /// Runs `f` on the highest-priority entry without cloning it.
    pub fn first_with<R>(&self, f: impl FnOnce(&T, &P) -> R) -> Result<R, DepqError> {
        let core = self.inner.lock();
        core.peek_first().map(|(item, priority)| f(item, priority))
    }

    /// Runs `f` on the lowest-priority entry without cloning it.
    pub fn last_with<R>(&self, f: impl FnOnce(&T, &P) -> R) -> Result<R, DepqError> {
        let core = self.inner.lock();
        core.peek_last().map(|(item, priority)| f(item, priority))
    }

    pub fn first(&self) -> Result<T, DepqError>
    where
        T: Clone,
    {
        self.inner.lock().first().cloned()
    }

    pub fn last(&self) -> Result<T, DepqError>
    where
        T: Clone,
    {
        self.inner.lock().last().cloned()
    }

    pub fn high(&self) -> Result<P, DepqError> {
        self.inner.lock().high().cloned()
    }

    pub fn low(&self) -> Result<P, DepqError> {
        self.inner.lock().low().cloned()
    }

    /// Returns a copy of the entry at `index` (0 = highest priority).
    pub fn get(&self, index: usize) -> Result<(T, P), DepqError>
    where
        T: Clone,
    {
        let core = self.inner.lock();
        core.get(index)
            .map(|(item, priority)| (item.clone(), priority.clone()))
    }

    pub fn count(&self, item: &T) -> usize {
        self.inner.lock().count(item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.inner.lock().contains(item)
    }

    /// Removes up to `count` matches of `item`, lowest priority first; a
    /// negative `count` removes all. See [`DepqCore::remove`].
    pub fn remove(&self, item: &T, count: isize) -> Vec<(T, P)> {
        self.inner.lock().remove(item, count)
    }

    /// Removes every match of `item`.
    pub fn elim(&self, item: &T) -> Vec<(T, P)> {
        self.inner.lock().elim(item)
    }

    /// See [`DepqCore::replace`].
    pub fn replace(&self, old: &T, new: T) -> Option<P> {
        self.inner.lock().replace(old, new)
    }

    /// See [`DepqCore::set_priority`].
    pub fn set_priority(&self, item: T, priority: P) -> Option<P> {
        self.inner.lock().set_priority(item, priority)
    }

    /// Always fails with [`DepqError::UnsupportedOperation`].
    pub fn remove_at(&self, index: usize) -> Result<(T, P), DepqError> {
        self.inner.lock().remove_at(index)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Copies the entries, highest priority first.
    pub fn to_vec(&self) -> Vec<(T, P)>
    where
        T: Clone,
    {
        self.inner.lock().to_vec()
    }

    /// Copies the items, highest priority first.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        let core = self.inner.lock();
        core.iter().map(|(item, _)| item.clone()).collect()
    }

    /// Copies the priorities, highest first.
    pub fn priorities(&self) -> Vec<P> {
        let core = self.inner.lock();
        core.iter().map(|(_, priority)| priority.clone()).collect()
    }

    /// Exports the entries and default priority.
    pub fn snapshot(&self) -> Snapshot<T, P>
    where
        T: Clone,
    {
        self.inner.lock().snapshot()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<T, P, K> Default for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, K> From<DepqCore<T, P, K>> for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone,
{
    fn from(core: DepqCore<T, P, K>) -> Self {
        Self::from_core(core)
    }
}

impl<T, P, K> Clone for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    T: Clone,
    P: Clone,
{
    /// Deep copy taken under the lock.
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.inner.lock().clone()),
        }
    }
}

impl<T, P, K> fmt::Debug for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    T: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(core) => f
                .debug_struct("Depq")
                .field("entries", &DebugEntries(&core.entries))
                .field("start", &core.start)
                .field("max_len", &core.max_len)
                .finish(),
            None => f
                .debug_struct("Depq")
                .field("entries", &format_args!("<locked>"))
                .finish_non_exhaustive(),
        }
    }
}

impl<T, P, K> fmt::Display for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    T: fmt::Display,
    P: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.lock(), f)
    }
}

impl<T, P, K> PartialEq for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    T: PartialEq,
    P: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        // lock in address order so `a == b` and `b == a` cannot deadlock
        let (lower, higher) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };
        let lower = lower.inner.lock();
        let higher = higher.inner.lock();
        *lower == *higher
    }
}

impl<T, P, K> FromIterator<(T, P)> for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        Self::from_core(DepqCore::from_iter(iter))
    }
}

#[cfg(feature = "metrics")]
impl<T, P, K> MetricsSnapshotProvider<DepqMetricsSnapshot> for Depq<T, P, K>
where
    K: KeyPolicy<T>,
{
    fn snapshot(&self) -> DepqMetricsSnapshot {
        MetricsSnapshotProvider::snapshot(&*self.inner.lock())
    }
}

#[cfg(feature = "metrics")]
impl<T, P, K> MetricsReset for Depq<T, P, K>
where
    K: KeyPolicy<T>,
    P: PartialOrd + Clone,
{
    fn reset_metrics(&self) {
        self.inner.lock().reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ByDisplay;

    fn entries<T: Clone, P: PartialOrd + Clone>(queue: &DepqCore<T, P>) -> Vec<(T, P)>
    where
        T: std::hash::Hash + Eq,
    {
        queue.to_vec()
    }

    // ==============================================
    // Insertion and ordering
    // ==============================================

    mod ordering {
        use super::*;

        #[test]
        fn insert_keeps_priority_order_and_ties_in_insertion_order() {
            let mut queue: DepqCore<&str, i32> = DepqCore::new();
            queue.insert("A", 5);
            queue.insert("B", 3);
            queue.insert("C", 3);
            queue.insert("D", 1);

            assert_eq!(
                entries(&queue),
                vec![("A", 5), ("B", 3), ("C", 3), ("D", 1)]
            );
            assert_eq!(queue.count(&"B"), 1);
            assert_eq!(queue.high(), Ok(&5));
            assert_eq!(queue.low(), Ok(&1));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn insert_equal_to_high_goes_after_existing_equals() {
            let mut queue: DepqCore<&str, i32> = DepqCore::new();
            queue.insert("a", 5);
            queue.insert("low", 1);
            queue.insert("b", 5);
            assert_eq!(entries(&queue), vec![("a", 5), ("b", 5), ("low", 1)]);
        }

        #[test]
        fn insert_equal_to_low_goes_to_back() {
            let mut queue: DepqCore<&str, i32> = DepqCore::new();
            queue.insert("a", 1);
            queue.insert("b", 1);
            queue.insert("c", 1);
            assert_eq!(entries(&queue), vec![("a", 1), ("b", 1), ("c", 1)]);
        }

        #[test]
        fn insert_middle_of_large_queue_uses_search() {
            let mut queue: DepqCore<u32, u32> = DepqCore::new();
            for i in (0..1000).rev() {
                queue.add_last(i, Some(i)).unwrap();
            }
            queue.insert(5000, 500);

            let position = queue
                .iter()
                .position(|(item, _)| *item == 5000)
                .unwrap();
            // 999..=500 come first, then the new 500 after the existing 500
            assert_eq!(position, 500);
            assert_eq!(queue.get(499), Ok((&500, &500)));
            assert_eq!(queue.get(501), Ok((&499, &499)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn insert_random_order_matches_stable_sort() {
            let priorities = [7, 3, 9, 3, 1, 7, 7, 0, 12, 5, 5, 9, 2, 8, 3, 3, 11, 4, 6, 10, 1, 1, 7];
            let mut queue: DepqCore<usize, i32> = DepqCore::new();
            for (item, &priority) in priorities.iter().enumerate() {
                queue.insert(item, priority);
                queue.check_invariants().unwrap();
            }

            let mut expected: Vec<(usize, i32)> = priorities.iter().copied().enumerate().collect();
            expected.sort_by(|a, b| b.1.cmp(&a.1));
            assert_eq!(entries(&queue), expected);
        }

        #[test]
        fn float_priorities_and_negatives() {
            let mut queue: DepqCore<&str, f64> = DepqCore::new();
            queue.insert("a", -1.5);
            queue.insert("b", 2.25);
            queue.insert("c", 0.0);
            assert_eq!(queue.first(), Ok(&"b"));
            assert_eq!(queue.last(), Ok(&"a"));
            assert_eq!(queue.get(1), Ok((&"c", &0.0)));
        }
    }

    // ==============================================
    // End insertion
    // ==============================================

    mod ends {
        use super::*;

        #[test]
        fn add_first_on_empty_uses_start_then_rejects_lower() {
            let mut queue: DepqCore<char, i32> = DepqCore::new();
            queue.add_first('x', None).unwrap();
            assert_eq!(entries(&queue), vec![('x', 0)]);

            assert_eq!(queue.add_first('y', Some(-1)), Err(DepqError::InvalidPriority));
            assert_eq!(entries(&queue), vec![('x', 0)]);
            assert_eq!(queue.count(&'y'), 0);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn add_first_without_priority_reuses_high_and_goes_before_equals() {
            let mut queue: DepqCore<char, i32> = DepqCore::with_start(10);
            queue.insert('a', 4);
            queue.add_first('b', None).unwrap();
            queue.add_first('c', Some(9)).unwrap();
            assert_eq!(entries(&queue), vec![('c', 9), ('b', 4), ('a', 4)]);
        }

        #[test]
        fn add_last_bounds_and_defaults() {
            let mut queue: DepqCore<char, i32> = DepqCore::with_start(3);
            queue.add_last('a', None).unwrap();
            queue.add_last('b', None).unwrap();
            queue.add_last('c', Some(-2)).unwrap();
            assert_eq!(queue.add_last('d', Some(0)), Err(DepqError::InvalidPriority));
            assert_eq!(entries(&queue), vec![('a', 3), ('b', 3), ('c', -2)]);
        }

        #[test]
        fn add_with_explicit_priority_on_empty_ignores_start() {
            let mut queue: DepqCore<char, i32> = DepqCore::with_start(100);
            queue.add_last('a', Some(7)).unwrap();
            assert_eq!(queue.high(), Ok(&7));
        }

        #[test]
        fn set_start_only_changes_future_defaults() {
            let mut queue: DepqCore<char, i32> = DepqCore::new();
            queue.add_first('a', None).unwrap();
            queue.set_start(42);
            assert_eq!(queue.start(), &42);
            assert_eq!(queue.high(), Ok(&0));
            queue.clear();
            queue.add_first('b', None).unwrap();
            assert_eq!(queue.high(), Ok(&42));
        }
    }

    // ==============================================
    // Pops, peeks and indexed access
    // ==============================================

    mod access {
        use super::*;

        #[test]
        fn empty_queue_peeks_and_pops_fail() {
            let mut queue: DepqCore<u8, u8> = DepqCore::new();
            assert_eq!(queue.pop_first(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.pop_last(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.first(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.last(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.high(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.low(), Err(DepqError::EmptyQueue));
        }

        #[test]
        fn pop_first_then_pop_last_shrinks_by_two() {
            let mut queue: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 1), (2, 2), (3, 3)], 0);
            assert_eq!(queue.pop_first(), Ok((3, 3)));
            assert_eq!(queue.pop_last(), Ok((1, 1)));
            assert_eq!(queue.len(), 1);
            assert_eq!(queue.count(&3), 0);
            assert_eq!(queue.count(&1), 0);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn get_out_of_range_reports_index_and_len() {
            let queue: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 1)], 0);
            assert_eq!(queue.get(0), Ok((&1, &1)));
            assert_eq!(
                queue.get(1),
                Err(DepqError::IndexOutOfRange { index: 1, len: 1 })
            );
        }

        #[test]
        fn remove_at_is_unsupported_and_changes_nothing() {
            let mut queue: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 1)], 0);
            assert!(matches!(
                queue.remove_at(0),
                Err(DepqError::UnsupportedOperation(_))
            ));
            assert_eq!(queue.len(), 1);
        }
    }

    // ==============================================
    // Removal and mutation
    // ==============================================

    mod removal {
        use super::*;

        #[test]
        fn remove_takes_lowest_priority_matches_first() {
            let mut queue: DepqCore<char, i32> = DepqCore::new();
            queue.insert('z', 7);
            queue.insert('a', 5);
            queue.insert('z', 4);
            queue.insert('z', 1);

            let removed = queue.remove(&'z', 2);
            assert_eq!(removed, vec![('z', 1), ('z', 4)]);
            assert_eq!(entries(&queue), vec![('z', 7), ('a', 5)]);
            assert_eq!(queue.count(&'z'), 1);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn remove_negative_count_removes_all() {
            let mut queue: DepqCore<char, i32> =
                DepqCore::from_pairs([('z', 1), ('q', 2), ('z', 3), ('z', 3)], 0);
            let removed = queue.remove(&'z', -1);
            assert_eq!(removed, vec![('z', 1), ('z', 3), ('z', 3)]);
            assert_eq!(entries(&queue), vec![('q', 2)]);
            assert!(!queue.contains(&'z'));
        }

        #[test]
        fn remove_more_than_present_and_absent_items() {
            let mut queue: DepqCore<char, i32> = DepqCore::from_pairs([('a', 1)], 0);
            assert_eq!(queue.remove(&'a', 5), vec![('a', 1)]);
            assert!(queue.remove(&'a', 1).is_empty());
            assert!(queue.remove(&'b', -1).is_empty());
            assert!(queue.is_empty());
        }

        #[test]
        fn remove_zero_count_is_noop() {
            let mut queue: DepqCore<char, i32> = DepqCore::from_pairs([('a', 1)], 0);
            assert!(queue.remove(&'a', 0).is_empty());
            assert_eq!(queue.count(&'a'), 1);
        }

        #[test]
        fn elim_removes_every_match() {
            let mut queue: DepqCore<u8, u8> = (0..20u8).map(|i| (i % 3, i)).collect();
            let removed = queue.elim(&0);
            assert_eq!(removed.len(), 7);
            assert!(removed.windows(2).all(|w| w[0].1 <= w[1].1));
            assert_eq!(queue.count(&0), 0);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn replace_moves_priority_to_new_item() {
            let mut queue: DepqCore<&str, i32> =
                DepqCore::from_pairs([("a", 9), ("old", 4), ("b", 4), ("c", 1)], 0);
            assert_eq!(queue.replace(&"old", "new"), Some(4));
            assert_eq!(
                entries(&queue),
                vec![("a", 9), ("b", 4), ("new", 4), ("c", 1)]
            );
            assert_eq!(queue.replace(&"missing", "x"), None);
            assert_eq!(queue.len(), 4);
        }

        #[test]
        fn set_priority_moves_or_inserts() {
            let mut queue: DepqCore<&str, i32> = DepqCore::from_pairs([("a", 1), ("b", 2)], 0);
            assert_eq!(queue.set_priority("a", 10), Some(1));
            assert_eq!(queue.first(), Ok(&"a"));
            assert_eq!(queue.set_priority("c", 0), None);
            assert_eq!(queue.last(), Ok(&"c"));
            assert_eq!(queue.count(&"a"), 1);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn clear_resets_counts() {
            let mut queue: DepqCore<&str, i32> = DepqCore::from_pairs([("a", 1), ("b", 2)], 0);
            queue.clear();
            assert!(queue.is_empty());
            assert_eq!(queue.count(&"a"), 0);
            assert_eq!(queue.count(&"b"), 0);
            assert_eq!(queue.distinct_len(), 0);
            queue.check_invariants().unwrap();
        }
    }

    // ==============================================
    // Length bound
    // ==============================================

    mod bounded {
        use super::*;

        #[test]
        fn insert_past_max_len_evicts_lowest() {
            let mut queue: DepqCore<char, i32> = DepqCore::new();
            queue.set_max_len(Some(2));
            assert_eq!(queue.insert('a', 5), None);
            assert_eq!(queue.insert('b', 1), None);
            assert_eq!(queue.insert('c', 3), Some(('b', 1)));
            assert_eq!(entries(&queue), vec![('a', 5), ('c', 3)]);
            assert_eq!(queue.count(&'b'), 0);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn lowering_max_len_trims_from_back() {
            let mut queue: DepqCore<u8, u8> = (0..5u8).map(|i| (i, i)).collect();
            let evicted = queue.set_max_len(Some(2));
            assert_eq!(evicted, vec![(0, 0), (1, 1), (2, 2)]);
            assert_eq!(entries(&queue), vec![(4, 4), (3, 3)]);
        }

        #[test]
        fn zero_max_len_stays_empty() {
            let mut queue: DepqCore<u8, u8> = DepqCore::new();
            queue.set_max_len(Some(0));
            assert_eq!(queue.insert(1, 1), Some((1, 1)));
            assert_eq!(queue.add_first(2, None), Ok(Some((2, 0))));
            assert!(queue.is_empty());
            assert_eq!(queue.count(&1), 0);
        }
    }

    // ==============================================
    // Construction, export and rendering
    // ==============================================

    mod surface {
        use super::*;

        #[test]
        fn from_pairs_sorts_stably() {
            let queue: DepqCore<char, i32> =
                DepqCore::from_pairs([('a', 1), ('b', 3), ('c', 1), ('d', 3)], 0);
            assert_eq!(
                entries(&queue),
                vec![('b', 3), ('d', 3), ('a', 1), ('c', 1)]
            );
            queue.check_invariants().unwrap();
        }

        #[test]
        fn snapshot_round_trip_is_equal() {
            let mut queue: DepqCore<&str, i32> = DepqCore::with_start(7);
            queue.insert("a", 2);
            queue.insert("b", 9);
            queue.insert("a", 2);

            let snapshot = queue.snapshot();
            assert_eq!(snapshot.start, 7);
            let rebuilt: DepqCore<&str, i32> = snapshot.into_core();
            assert_eq!(rebuilt, queue);
            assert_eq!(rebuilt.count(&"a"), 2);
        }

        #[test]
        fn equality_ignores_start() {
            let a: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 1)], 0);
            let b: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 1)], 9);
            let c: DepqCore<u8, u8> = DepqCore::from_pairs([(1, 2)], 0);
            assert_eq!(a, b);
            assert_ne!(a, c);
        }

        #[test]
        fn display_and_debug_render_entries() {
            let queue: DepqCore<&str, i32> = DepqCore::from_pairs([("a", 2), ("b", 1)], 0);
            assert_eq!(queue.to_string(), "[(a, 2), (b, 1)]");
            let debug = format!("{:?}", queue);
            assert!(debug.starts_with("DepqCore"));
            assert!(debug.contains("[(\"a\", 2), (\"b\", 1)]"));
        }

        #[test]
        fn extend_inserts_in_order() {
            let mut queue: DepqCore<u8, u8> = DepqCore::new();
            queue.extend([(1, 1), (3, 3), (2, 2)]);
            let priorities: Vec<u8> = queue.iter().map(|(_, priority)| *priority).collect();
            assert_eq!(priorities, vec![3, 2, 1]);
        }
    }

    // ==============================================
    // Display-keyed items
    // ==============================================

    mod by_display {
        use super::*;

        #[test]
        fn display_keys_count_unhashable_items() {
            let mut queue: DepqCore<f64, i32, ByDisplay> = DepqCore::new();
            queue.insert(0.5, 1);
            queue.insert(0.5, 4);
            queue.insert(1.5, 2);
            assert_eq!(queue.count(&0.5), 2);
            assert_eq!(queue.remove(&0.5, 1), vec![(0.5, 1)]);
            assert_eq!(queue.count(&0.5), 1);
            queue.check_invariants().unwrap();
        }
    }

    // ==============================================
    // Locked wrapper
    // ==============================================

    mod locked {
        use super::*;

        #[test]
        fn depq_mirrors_core_operations() {
            let queue: Depq<&str, i32> = Depq::new();
            queue.insert("A", 5);
            queue.insert("B", 3);
            queue.insert("C", 3);
            queue.insert("D", 1);

            assert_eq!(queue.first(), Ok("A"));
            assert_eq!(queue.last(), Ok("D"));
            assert_eq!(queue.high(), Ok(5));
            assert_eq!(queue.low(), Ok(1));
            assert_eq!(queue.get(1), Ok(("B", 3)));
            assert_eq!(queue.items(), vec!["A", "B", "C", "D"]);
            assert_eq!(queue.priorities(), vec![5, 3, 3, 1]);
            assert_eq!(queue.first_with(|item, priority| (item.len(), *priority)), Ok((1, 5)));
            assert_eq!(queue.last_with(|_, priority| *priority), Ok(1));
        }

        #[test]
        fn depq_errors_release_the_lock() {
            let queue: Depq<u8, u8> = Depq::new();
            assert_eq!(queue.pop_first(), Err(DepqError::EmptyQueue));
            assert_eq!(queue.get(3), Err(DepqError::IndexOutOfRange { index: 3, len: 0 }));
            // would deadlock if an error path leaked the guard
            queue.insert(1, 1);
            assert_eq!(queue.try_pop_first(), Some(Ok((1, 1))));
            assert_eq!(queue.try_pop_last(), Some(Err(DepqError::EmptyQueue)));
        }

        #[test]
        fn try_pop_returns_none_while_locked() {
            let queue: Depq<u8, u8> = Depq::from_pairs([(1, 1)], 0);
            queue.read_with(|core| {
                assert_eq!(core.len(), 1);
                assert!(queue.try_pop_first().is_none());
                assert!(queue.try_pop_last().is_none());
            });
            assert_eq!(queue.len(), 1);
        }

        #[test]
        fn depq_equality_and_self_equality() {
            let a: Depq<u8, u8> = Depq::from_pairs([(1, 1), (2, 2)], 0);
            let b: Depq<u8, u8> = Depq::from_pairs([(2, 2), (1, 1)], 5);
            assert!(a == a);
            assert!(a == b);
            assert!(b == a);
            b.pop_last().unwrap();
            assert!(a != b);
        }

        #[test]
        fn depq_clone_is_independent() {
            let a: Depq<u8, u8> = Depq::from_pairs([(1, 1)], 0);
            let b = a.clone();
            b.insert(2, 2);
            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 2);
        }

        #[test]
        fn depq_debug_while_locked_does_not_block() {
            let queue: Depq<u8, u8> = Depq::from_pairs([(1, 1)], 0);
            let unlocked = format!("{:?}", queue);
            assert!(unlocked.contains("entries: [(1, 1)]"));
            let locked = queue.read_with(|_| format!("{:?}", queue));
            assert!(locked.contains("<locked>"));
        }

        #[test]
        fn depq_into_core_and_from_core() {
            let queue: Depq<u8, u8> = [(3, 3), (1, 1)].into_iter().collect();
            let core = queue.into_core();
            assert_eq!(core.len(), 2);
            let queue = Depq::from(core);
            assert_eq!(queue.to_string(), "[(3, 3), (1, 1)]");
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn metrics_track_fast_paths_and_search() {
            let mut queue: DepqCore<u32, u32> = DepqCore::new();
            queue.insert(0, 10);
            queue.insert(1, 0);
            for i in 0..50 {
                queue.insert(100 + i, 1 + (i % 9));
            }
            queue.pop_first().unwrap();
            queue.count(&1);

            let snapshot = MetricsSnapshotProvider::snapshot(&queue);
            assert_eq!(snapshot.insert_calls, 52);
            assert!(snapshot.insert_front_fast_path >= 1);
            assert!(snapshot.insert_back_fast_path >= 1);
            assert!(snapshot.search_calls > 0);
            assert_eq!(snapshot.pop_first_calls, 1);
            assert_eq!(snapshot.count_calls, 1);
            assert_eq!(snapshot.count_hits, 1);
            assert_eq!(snapshot.len, 51);

            queue.reset_metrics();
            assert_eq!(MetricsSnapshotProvider::snapshot(&queue).insert_calls, 0);
        }
    }
}
