//! Provide `FixedHasher`.
//!
//! `FixedHasher` based on `foldhash` crate,
//! Provide stable hash results through a fixed hash seed.

use core::hash::{BuildHasher, Hash};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5B1D_7E3A_C04F_92E1);

/// A fixed hasher provided hash results that only related on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`] .
///
/// Which can be created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed Hash State based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use bw_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// 3.hash(&mut a);
///
/// let mut b = FixedHashState.build_hasher();
/// 3.hash(&mut b);
///
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hashes a single value with [`FixedHashState`].
///
/// Used to combine element hashes of unordered containers.
#[inline]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    FixedHashState.hash_one(value)
}
