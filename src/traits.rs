//! # Lookup Key Policies
//!
//! A queue keeps an occurrence count for every item it holds so that
//! `count`/`contains` are O(1). The count is keyed by a lookup key derived
//! from the item; [`KeyPolicy`] decides how that key is derived.
//!
//! ## Policies
//!
//! | Policy       | Item bound                 | Key             | Notes                              |
//! |--------------|----------------------------|-----------------|------------------------------------|
//! | [`ByValue`]  | `Hash + Eq + Clone`        | the item itself | Default; exact identity            |
//! | [`ByDisplay`]| `Display`                  | `String`        | Fallback for items without `Hash`  |
//!
//! ## Key Collisions Under `ByDisplay`
//!
//! ```text
//!   struct Job { name: &'static str, id: u32 }   // Display prints only `name`
//!
//!   ByDisplay::key_of(&Job { name: "sync", id: 1 })  == "sync"
//!   ByDisplay::key_of(&Job { name: "sync", id: 2 })  == "sync"
//! ```
//!
//! Two distinct items with the same rendering share one count and match each
//! other in `remove`. This is a known limitation of the fallback tier.
//!
//! ## Example
//!
//! ```
//! use depq::Depq;
//! use depq::traits::ByDisplay;
//!
//! // f64 is not Hash/Eq, so count it through its Display form.
//! let queue: Depq<f64, i32, ByDisplay> = Depq::new();
//! queue.insert(0.5, 3);
//! queue.insert(0.5, 1);
//! assert_eq!(queue.count(&0.5), 2);
//! ```

use std::fmt::Display;
use std::hash::Hash;

/// Derives the frequency-index key for an item.
pub trait KeyPolicy<T> {
    /// Key stored in the frequency index.
    type Key: Hash + Eq + Clone;

    /// Builds the owned key for `item`.
    fn key_of(item: &T) -> Self::Key;

    /// Runs `f` with the key for `item`.
    ///
    /// Policies whose key is the item itself override this to avoid building
    /// an owned key on lookups.
    #[inline]
    fn with_key<R>(item: &T, f: impl FnOnce(&Self::Key) -> R) -> R {
        f(&Self::key_of(item))
    }
}

/// Keys items by their own value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ByValue;

impl<T> KeyPolicy<T> for ByValue
where
    T: Hash + Eq + Clone,
{
    type Key = T;

    #[inline]
    fn key_of(item: &T) -> T {
        item.clone()
    }

    #[inline]
    fn with_key<R>(item: &T, f: impl FnOnce(&Self::Key) -> R) -> R {
        f(item)
    }
}

/// Keys items by their `Display` rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ByDisplay;

impl<T> KeyPolicy<T> for ByDisplay
where
    T: Display,
{
    type Key = String;

    #[inline]
    fn key_of(item: &T) -> String {
        item.to_string()
    }
}
