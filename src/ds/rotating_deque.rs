//! Ring-buffer sequence with rotation-aware search and placement.
//!
//! Backs the ordered entries of a [`DepqCore`](crate::depq::DepqCore). Both
//! ends are O(1); a search walks a [`RotationCursor`] whose offset is moved by
//! the distance between successive probes (a logical rotation, nothing is
//! copied), and placement rotates the ring from whichever end is closer to
//! the target index.
//!
//! ## Architecture
//!
//! ```text
//!   buf: VecDeque<T>            (ring buffer, logical index 0 = front)
//!
//!   logical:  [ e0 | e1 | e2 | e3 | e4 | e5 | e6 | e7 ]
//!                          ▲
//!   cursor.offset = 2 ─────┘   front() = e2, behind() = e1
//!
//!   cursor.seek(6): rotate by +4, travelled += 4
//!   cursor.seek(4): rotate by -2, travelled += 2
//! ```
//!
//! ## Rotation-aware binary search
//!
//! ```text
//!   partition_point_rotating(pred)
//!        │
//!        ▼
//!   window [lo, hi) > LINEAR_SCAN_WINDOW ?
//!        │ yes: seek(mid), probe, halve window   (travel sums to O(n))
//!        │ no:  linear scan lo..hi
//!        ▼
//!   first index where pred is false
//! ```
//!
//! ## Placement
//!
//! ```text
//!   insert_rotating(idx, v), n = len
//!
//!   idx <= n - idx (closer to front):
//!     rotate_left(idx)      [x_idx .. x_n-1, x_0 .. x_idx-1]
//!     push_back(v)          [x_idx .. x_n-1, x_0 .. x_idx-1, v]
//!     rotate_right(idx + 1) [x_0 .. x_idx-1, v, x_idx .. x_n-1]
//!
//!   otherwise (closer to back), k = n - idx:
//!     rotate_right(k)       [x_idx .. x_n-1, x_0 .. x_idx-1]
//!     push_front(v)         [v, x_idx .. x_n-1, x_0 .. x_idx-1]
//!     rotate_left(k + 1)    [x_0 .. x_idx-1, v, x_idx .. x_n-1]
//! ```
//!
//! ## Performance
//!
//! | Operation                  | Time              |
//! |----------------------------|-------------------|
//! | `push_*` / `pop_*`         | O(1) amortized    |
//! | `get`                      | O(1)              |
//! | `partition_point_rotating` | O(log n) probes, O(n) cursor travel |
//! | `insert_rotating`          | O(min(idx, n - idx)) |
//! | `remove_from_back_where`   | O(n)              |
use std::collections::VecDeque;
use std::collections::vec_deque;

/// Window size at which binary search hands over to a linear scan.
pub const LINEAR_SCAN_WINDOW: usize = 10;

/// Counters describing one rotation-aware search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Binary-search probes performed before the linear scan.
    pub probes: u64,
    /// Total cursor rotation distance over the whole search.
    pub travelled: u64,
    /// Entries examined by the final linear scan.
    pub scan_steps: u64,
}

/// Double-ended ring-buffer sequence with logical rotation.
#[derive(Debug, Clone)]
pub struct RotatingDeque<T> {
    buf: VecDeque<T>,
}

impl<T> RotatingDeque<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            buf: VecDeque::new(),
        }
    }

    /// Creates an empty sequence with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
        }
    }

    /// Builds a sequence from entries already in logical order.
    pub fn from_vec(entries: Vec<T>) -> Self {
        Self {
            buf: VecDeque::from(entries),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    /// Returns the front entry.
    pub fn front(&self) -> Option<&T> {
        self.buf.front()
    }

    /// Returns the back entry.
    pub fn back(&self) -> Option<&T> {
        self.buf.back()
    }

    /// Returns the entry at logical index `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    pub fn push_front(&mut self, value: T) {
        self.buf.push_front(value);
    }

    pub fn push_back(&mut self, value: T) {
        self.buf.push_back(value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.buf.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.buf.pop_back()
    }

    /// Drops every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Iterates front to back.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.buf.iter()
    }

    /// Returns a cursor positioned at logical index 0.
    pub fn cursor(&self) -> RotationCursor<'_, T> {
        RotationCursor {
            buf: &self.buf,
            offset: 0,
            travelled: 0,
        }
    }

    /// Finds the first index for which `pred` is `false`.
    ///
    /// The sequence must be partitioned by `pred` (all `true` entries before
    /// all `false` ones). Probes are made through a [`RotationCursor`] so each
    /// probe costs the distance from the previous one; once the candidate
    /// window shrinks to [`LINEAR_SCAN_WINDOW`] entries the rest is a linear
    /// scan.
    pub fn partition_point_rotating<F>(&self, mut pred: F) -> (usize, SearchStats)
    where
        F: FnMut(&T) -> bool,
    {
        let mut stats = SearchStats::default();
        let mut cursor = self.cursor();
        // every index < lo satisfies pred, every index >= hi does not
        let mut lo = 0;
        let mut hi = self.buf.len();

        while hi - lo > LINEAR_SCAN_WINDOW {
            let mid = lo + (hi - lo) / 2;
            cursor.seek(mid);
            stats.probes += 1;
            match cursor.front() {
                Some(entry) if pred(entry) => lo = mid + 1,
                _ => hi = mid,
            }
        }

        cursor.seek(lo);
        while cursor.offset() < hi {
            stats.scan_steps += 1;
            match cursor.front() {
                Some(entry) if pred(entry) => cursor.seek(cursor.offset() + 1),
                _ => break,
            }
        }

        stats.travelled = cursor.travelled();
        (cursor.offset(), stats)
    }

    /// Inserts `value` at logical index `index`, rotating from the closer end.
    ///
    /// Returns the rotation distance paid, `min(index, len - index)`.
    /// An `index` past the end appends.
    pub fn insert_rotating(&mut self, index: usize, value: T) -> usize {
        let len = self.buf.len();
        let index = index.min(len);

        if index == 0 {
            self.buf.push_front(value);
            return 0;
        }
        if index == len {
            self.buf.push_back(value);
            return 0;
        }

        let from_back = len - index;
        if index <= from_back {
            self.buf.rotate_left(index);
            self.buf.push_back(value);
            self.buf.rotate_right(index + 1);
            index
        } else {
            self.buf.rotate_right(from_back);
            self.buf.push_front(value);
            self.buf.rotate_left(from_back + 1);
            from_back
        }
    }

    /// Removes up to `limit` entries matching `pred`, scanning from the back.
    ///
    /// `None` removes every match. Removed entries are returned in scan order
    /// (back to front). The relative order of kept entries is unchanged.
    pub fn remove_from_back_where<F>(&mut self, limit: Option<usize>, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        if limit == Some(0) {
            return Vec::new();
        }

        // descending logical indices
        let mut hits = Vec::new();
        for (index, entry) in self.buf.iter().enumerate().rev() {
            if pred(entry) {
                hits.push(index);
                if limit.is_some_and(|limit| hits.len() >= limit) {
                    break;
                }
            }
        }

        match hits.as_slice() {
            [] => Vec::new(),
            &[index] => self.buf.remove(index).into_iter().collect(),
            _ => self.compact_out(&hits),
        }
    }

    /// Rebuilds the ring without the entries at `hits` (descending indices).
    fn compact_out(&mut self, hits: &[usize]) -> Vec<T> {
        let mut removed = Vec::with_capacity(hits.len());
        let mut kept = VecDeque::with_capacity(self.buf.len() - hits.len());
        let mut next = hits.iter().rev().copied().peekable();

        for (index, entry) in self.buf.drain(..).enumerate() {
            if next.next_if_eq(&index).is_some() {
                removed.push(entry);
            } else {
                kept.push_back(entry);
            }
        }

        self.buf = kept;
        removed.reverse();
        removed
    }

    /// Stable-sorts the entries in place.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.buf.make_contiguous().sort_by(compare);
    }
}

impl<T> Default for RotatingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for RotatingDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for RotatingDeque<T> {}

impl<T> FromIterator<T> for RotatingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            buf: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for RotatingDeque<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RotatingDeque<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

/// Read-only view of a [`RotatingDeque`] with a movable logical start.
///
/// Rotating the cursor only moves its offset; the accumulated distance is
/// reported by [`travelled`](RotationCursor::travelled).
#[derive(Debug)]
pub struct RotationCursor<'a, T> {
    buf: &'a VecDeque<T>,
    offset: usize,
    travelled: usize,
}

impl<'a, T> RotationCursor<'a, T> {
    /// Current logical offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total rotation distance since the cursor was created.
    pub fn travelled(&self) -> u64 {
        self.travelled as u64
    }

    /// Rotates the view by `delta` positions (positive moves toward the back).
    ///
    /// The offset wraps around the ring.
    pub fn rotate(&mut self, delta: isize) {
        let len = self.buf.len();
        if len == 0 {
            return;
        }
        self.travelled += delta.unsigned_abs();
        let shift = delta.rem_euclid(len as isize) as usize;
        self.offset = (self.offset + shift) % len;
    }

    /// Rotates the view so `index` becomes its start.
    pub fn seek(&mut self, index: usize) {
        if index >= self.offset {
            self.travelled += index - self.offset;
        } else {
            self.travelled += self.offset - index;
        }
        self.offset = index;
    }

    /// Entry at the start of the rotated view.
    pub fn front(&self) -> Option<&'a T> {
        self.buf.get(self.offset)
    }

    /// Entry just before the start of the rotated view (the view's back).
    pub fn behind(&self) -> Option<&'a T> {
        if self.buf.is_empty() {
            return None;
        }
        let len = self.buf.len();
        self.buf.get((self.offset + len - 1) % len)
    }
}
