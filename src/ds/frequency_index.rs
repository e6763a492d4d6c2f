//! Occurrence counts keyed by a derived lookup key.
//!
//! Keeps, for every key currently present in a queue, how many entries carry
//! it. A key whose count would drop to zero is removed, so `len()` is the
//! number of distinct keys present.
//!
//! ## Architecture
//!
//! ```text
//!   counts: FxHashMap<K, usize>
//!   ┌─────────┬───────┐
//!   │  "a"    │   2   │   increment("a") → 3
//!   │  "b"    │   1   │   decrement("b") → 0, entry dropped
//!   └─────────┴───────┘
//! ```
//!
//! ## Performance
//! - `increment` / `decrement` / `count`: O(1) average
//! - `clear`: O(distinct keys)
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
/// Map from lookup key to a strictly positive occurrence count.
pub struct FrequencyIndex<K> {
    counts: FxHashMap<K, usize>,
    total: usize,
}

impl<K> FrequencyIndex<K>
where
    K: Eq + Hash,
{
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
            total: 0,
        }
    }

    /// Creates an empty index with room for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            total: 0,
        }
    }

    /// Number of distinct keys present.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no key is present.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts (the number of entries tracked).
    pub fn total(&self) -> usize {
        self.total
    }

    /// Reserves room for at least `additional` more distinct keys.
    pub fn reserve(&mut self, additional: usize) {
        self.counts.reserve(additional);
    }

    /// Returns the count for `key`, 0 if absent.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Returns `true` if `key` has a positive count.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// Adds one occurrence of `key`, cloning it only when it is new.
    ///
    /// Returns the new count.
    pub fn increment(&mut self, key: &K) -> usize
    where
        K: Clone,
    {
        self.total += 1;
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
            return *count;
        }
        self.counts.insert(key.clone(), 1);
        1
    }

    /// Adds one occurrence of an owned `key`.
    pub fn increment_owned(&mut self, key: K) -> usize {
        self.total += 1;
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Removes one occurrence of `key`, dropping it when the count hits 0.
    ///
    /// Returns the remaining count; a missing key is left alone and yields 0.
    pub fn decrement<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(count) = self.counts.get_mut(key) else {
            return 0;
        };
        self.total -= 1;
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(key);
        }
        remaining
    }

    /// Drops every key.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    /// Iterates `(key, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.counts.values().all(|&count| count > 0));
        assert_eq!(self.counts.values().sum::<usize>(), self.total);
    }
}

impl<K> Default for FrequencyIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<K> for FrequencyIndex<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = Self::new();
        for key in iter {
            index.increment_owned(key);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_index_counts_and_drops_zero() {
        let mut index = FrequencyIndex::new();
        assert_eq!(index.increment(&"a"), 1);
        assert_eq!(index.increment(&"a"), 2);
        assert_eq!(index.increment(&"b"), 1);
        assert_eq!(index.count(&"a"), 2);
        assert_eq!(index.total(), 3);

        assert_eq!(index.decrement(&"b"), 0);
        assert!(!index.contains(&"b"));
        assert_eq!(index.len(), 1);
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_missing_key_is_zero() {
        let mut index: FrequencyIndex<String> = FrequencyIndex::new();
        assert_eq!(index.count("nope"), 0);
        assert_eq!(index.decrement("nope"), 0);
        assert_eq!(index.total(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn frequency_index_borrowed_lookup() {
        let mut index: FrequencyIndex<String> = FrequencyIndex::new();
        index.increment_owned("key".to_string());
        index.increment(&"key".to_string());
        assert_eq!(index.count("key"), 2);
        assert_eq!(index.decrement("key"), 1);
    }

    #[test]
    fn frequency_index_from_iter_and_clear() {
        let mut index: FrequencyIndex<u32> = [1, 2, 2, 3, 3, 3].into_iter().collect();
        assert_eq!(index.count(&3), 3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.total(), 6);
        index.debug_validate_invariants();

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.count(&3), 0);
        assert_eq!(index.total(), 0);
    }
}
