//! depq: a thread-safe double-ended priority queue.
//!
//! Entries are `(item, priority)` pairs kept in non-increasing priority order.
//! Both ends are O(1) to read and remove, item frequencies are O(1) to query,
//! and arbitrary-priority inserts use a rotation-aware search over a ring
//! buffer.
//!
//! - [`Depq`]: locked queue, share it with `Arc`.
//! - [`DepqCore`]: the same queue without synchronization.
//! - [`DepqBuilder`](builder::DepqBuilder): default priority, length bound, capacity.
//! - [`traits::KeyPolicy`]: how items map to frequency-index keys.
//!
//! ```
//! use depq::Depq;
//!
//! let queue: Depq<&str, i32> = Depq::new();
//! queue.insert("A", 5);
//! queue.insert("B", 3);
//! queue.insert("C", 3);
//! queue.insert("D", 1);
//! assert_eq!(queue.to_string(), "[(A, 5), (B, 3), (C, 3), (D, 1)]");
//! assert_eq!(queue.pop_last(), Ok(("D", 1)));
//! ```

pub mod builder;
pub mod depq;
pub mod ds;
pub mod error;
pub mod export;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::depq::{Depq, DepqCore};
pub use crate::ds::{FrequencyIndex, RotatingDeque, RotationCursor, SearchStats};
pub use crate::error::{DepqError, InvariantError};
pub use crate::export::Snapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::DepqMetricsSnapshot;
