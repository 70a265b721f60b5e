//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! Containers default to [`FixedHashState`], so hashing results only depend on
//! the input. Two processes hashing the same values agree on the result,
//! which keeps iteration order of hash based containers reproducible.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher, hash_one};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// # Examples
///
/// ```
/// use bw_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::default();
/// map.insert("a", 1);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
///
/// # Examples
///
/// ```
/// use bw_utils::hash::HashSet;
///
/// let mut set: HashSet<&str> = HashSet::default();
/// assert!(set.insert("a"));
/// assert!(!set.insert("a"));
/// ```
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
