//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max id in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WCHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WCHashMap<K, V> {
            WCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WCHashMap<K, V> {
            WCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WCHashSet<V> = ahash::AHashSet<V>;

        /// Create a new empty hash set.
        pub fn hash_set_new<V>() -> WCHashSet<V> {
            WCHashSet::new()
        }

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type WCHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WCHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WCHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WCHashSet<V> = foldhash::HashSet<V>;

        /// Create a new empty hash set.
        pub fn hash_set_new<V>() -> WCHashSet<V> {
            foldhash::HashSetExt::new()
        }

    } else {
        /// Type Alias for hash maps in this crate.
        pub type WCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WCHashMap<K, V> {
            WCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WCHashMap<K, V> {
            WCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WCHashSet<V> = std::collections::HashSet<V>;

        /// Create a new empty hash set.
        pub fn hash_set_new<V>() -> WCHashSet<V> {
            WCHashSet::new()
        }
    }
}

/// Compile-time check that a value is `Send`.
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: &S) {}

/// Compile-time check that a value is `Sync`.
#[cfg(test)]
pub(crate) fn check_is_sync<S: Sync>(_: &S) {}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;

    #[test]
    fn test_common_token_types() {
        struct IsToken<T: TokenType>(PhantomData<T>);

        let _: IsToken<u16>;
        let _: IsToken<u32>;
        let _: IsToken<u64>;
        let _: IsToken<usize>;
    }

    #[test]
    fn test_hash_aliases() {
        let mut map: WCHashMap<&str, u32> = hash_map_with_capacity(2);
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));

        let mut set: WCHashSet<u32> = hash_set_new();
        assert!(set.insert(3));
        assert!(!set.insert(3));

        let empty: WCHashMap<u8, u8> = hash_map_new();
        assert!(empty.is_empty());
    }
}
