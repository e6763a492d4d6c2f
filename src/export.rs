//! Plain-data export of a queue.
//!
//! [`Snapshot`] is the owned, lock-free form of a queue's contents: the
//! entries in order plus the default priority. It is what `serde` writes for
//! both [`DepqCore`] and [`Depq`] when the `serde` feature is enabled, and
//! deserialization rebuilds the frequency index from it.
//!
//! ```text
//!   {"entries":[["a",5],["b",3],["c",3]],"start":0}
//! ```
//!
//! The length bound and metrics are not part of the export.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::depq::{Depq, DepqCore};
use crate::traits::KeyPolicy;

/// Owned copy of a queue's entries (highest priority first) and default
/// priority.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot<T, P> {
    pub entries: Vec<(T, P)>,
    pub start: P,
}

impl<T, P> Snapshot<T, P>
where
    P: PartialOrd + Clone,
{
    /// Rebuilds a single-threaded queue. Entries are re-sorted if needed.
    pub fn into_core<K: KeyPolicy<T>>(self) -> DepqCore<T, P, K> {
        DepqCore::from_pairs(self.entries, self.start)
    }

    /// Rebuilds a locked queue.
    pub fn into_depq<K: KeyPolicy<T>>(self) -> Depq<T, P, K> {
        Depq::from_core(self.into_core())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Snapshot;
    use crate::depq::{Depq, DepqCore};
    use crate::traits::KeyPolicy;

    struct EntriesRef<'a, T, P, K: KeyPolicy<T>>(&'a DepqCore<T, P, K>);

    impl<T, P, K> Serialize for EntriesRef<'_, T, P, K>
    where
        T: Serialize,
        P: Serialize + PartialOrd + Clone,
        K: KeyPolicy<T>,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.iter())
        }
    }

    impl<T, P, K> Serialize for DepqCore<T, P, K>
    where
        T: Serialize,
        P: Serialize + PartialOrd + Clone,
        K: KeyPolicy<T>,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Snapshot", 2)?;
            state.serialize_field("entries", &EntriesRef(self))?;
            state.serialize_field("start", self.start())?;
            state.end()
        }
    }

    impl<'de, T, P, K> Deserialize<'de> for DepqCore<T, P, K>
    where
        T: Deserialize<'de>,
        P: Deserialize<'de> + PartialOrd + Clone,
        K: KeyPolicy<T>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(Snapshot::<T, P>::deserialize(deserializer)?.into_core())
        }
    }

    impl<T, P, K> Serialize for Depq<T, P, K>
    where
        T: Serialize,
        P: Serialize + PartialOrd + Clone,
        K: KeyPolicy<T>,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.read_with(|core| core.serialize(serializer))
        }
    }

    impl<'de, T, P, K> Deserialize<'de> for Depq<T, P, K>
    where
        T: Deserialize<'de>,
        P: Deserialize<'de> + PartialOrd + Clone,
        K: KeyPolicy<T>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(Depq::from_core(DepqCore::deserialize(deserializer)?))
        }
    }
}
