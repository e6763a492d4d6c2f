//! Error types for the depq library.
//!
//! ## Key Components
//!
//! - [`DepqError`]: Returned by queue operations that cannot be satisfied
//!   (empty queue, out-of-range index, priority bound violations, positional
//!   deletion).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use depq::Depq;
//! use depq::error::DepqError;
//!
//! let queue: Depq<&str, i32> = Depq::new();
//! assert_eq!(queue.pop_first(), Err(DepqError::EmptyQueue));
//!
//! queue.add_first("x", None).unwrap();
//! assert_eq!(queue.add_first("y", Some(-1)), Err(DepqError::InvalidPriority));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// DepqError
// ---------------------------------------------------------------------------

/// Error returned by queue operations.
///
/// Every error is detected before the queue is modified, so a failed call
/// leaves both the ordered entries and the frequency index untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepqError {
    /// A priority passed to `add_first`/`add_last` breaks the ordering bound
    /// at that end.
    InvalidPriority,
    /// A peek or pop was requested on an empty queue.
    EmptyQueue,
    /// Indexed access outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// The operation is intentionally not offered (e.g. deletion by index).
    UnsupportedOperation(&'static str),
}

impl fmt::Display for DepqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepqError::InvalidPriority => {
                f.write_str("priority violates the ordering bound at that end of the queue")
            },
            DepqError::EmptyQueue => f.write_str("depq is empty"),
            DepqError::IndexOutOfRange { index, len } => {
                write!(f, "depq has no index {} (len {})", index, len)
            },
            DepqError::UnsupportedOperation(what) => {
                write!(f, "unsupported operation: {}", what)
            },
        }
    }
}

impl std::error::Error for DepqError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced by [`DepqCore::check_invariants`](crate::depq::DepqCore::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
