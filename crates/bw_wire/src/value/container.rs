use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{ContainerKind, Type};

// -----------------------------------------------------------------------------
// Container

/// A runtime container stored inside a [`Value`](crate::Value).
///
/// Implemented by every concrete container kind the factories know how to
/// read and build. The trait is object safe, dynamic equality, ordering and
/// hashing are provided so values holding containers can be set elements
/// and map keys.
///
/// Two containers of different kinds are ordered by their type path.
pub trait Container: Any + Send + Sync + fmt::Debug {
    /// Returns the static kind of this container.
    fn container_kind(&self) -> &'static ContainerKind;

    /// Returns the runtime type, the type of the kind.
    #[inline]
    fn container_type(&self) -> Type {
        self.container_kind().ty()
    }

    /// Returns the number of entries.
    ///
    /// Counted containers return the number of distinct elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clones into a new boxed container.
    fn clone_container(&self) -> Box<dyn Container>;

    fn container_eq(&self, other: &dyn Container) -> bool;

    fn container_cmp(&self, other: &dyn Container) -> Ordering;

    fn container_hash(&self, state: &mut dyn Hasher);
}

impl dyn Container {
    /// Returns `true` if the container is a `T`.
    #[inline]
    pub fn is<T: Container>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to a concrete container.
    #[inline]
    pub fn downcast_ref<T: Container>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts a box to a concrete container, `None` on a type mismatch.
    #[inline]
    pub fn downcast<T: Container>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl Clone for Box<dyn Container> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_container()
    }
}

impl PartialEq for dyn Container {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.container_eq(other)
    }
}

impl Eq for dyn Container {}

impl PartialOrd for dyn Container {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.container_cmp(other))
    }
}

impl Ord for dyn Container {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.container_cmp(other)
    }
}

impl Hash for dyn Container {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container_hash(state);
    }
}

// -----------------------------------------------------------------------------
// Helpers for hash based containers

/// Ordering of two iterables whose iteration order is unspecified.
pub(crate) fn unordered_cmp<T, I>(a: I, b: I) -> Ordering
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut a: Vec<T> = a.into_iter().collect();
    let mut b: Vec<T> = b.into_iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a.cmp(&b)
}

/// Order independent hash: the wrapping sum of the element hashes.
pub(crate) fn unordered_hash<T: Hash>(items: impl IntoIterator<Item = T>, state: &mut dyn Hasher) {
    let mut sum = 0_u64;
    let mut len = 0_usize;
    for item in items {
        sum = sum.wrapping_add(bw_utils::hash::hash_one(&item));
        len += 1;
    }
    state.write_u64(sum);
    state.write_usize(len);
}

// -----------------------------------------------------------------------------
// impl_container

/// Implements [`Container`] for a type.
///
/// - `ordered`: the type is `Clone + Ord + Hash`.
/// - `unordered`: the type is `Clone + Eq` and iterates in unspecified order;
///   ordering and hashing go through the sorted items.
macro_rules! impl_container {
    (@common $kind:expr) => {
        #[inline]
        fn container_kind(&self) -> &'static $crate::info::ContainerKind {
            $kind
        }

        #[inline]
        fn len(&self) -> usize {
            Self::len(self)
        }

        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline]
        fn into_any(
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn ::core::any::Any> {
            self
        }

        #[inline]
        fn clone_container(&self) -> ::alloc::boxed::Box<dyn $crate::value::Container> {
            ::alloc::boxed::Box::new(::core::clone::Clone::clone(self))
        }

        fn container_eq(&self, other: &dyn $crate::value::Container) -> bool {
            match $crate::value::Container::as_any(other).downcast_ref::<Self>() {
                Some(other) => self == other,
                None => false,
            }
        }
    };
    (ordered $ty:ty => $kind:expr) => {
        impl $crate::value::Container for $ty {
            $crate::value::impl_container!(@common $kind);

            fn container_cmp(&self, other: &dyn $crate::value::Container) -> ::core::cmp::Ordering {
                match $crate::value::Container::as_any(other).downcast_ref::<Self>() {
                    Some(other) => ::core::cmp::Ord::cmp(self, other),
                    None => ::core::cmp::Ord::cmp(
                        &$crate::value::Container::container_type(self),
                        &$crate::value::Container::container_type(other),
                    ),
                }
            }

            fn container_hash(&self, mut state: &mut dyn ::core::hash::Hasher) {
                ::core::hash::Hash::hash(
                    $crate::value::Container::container_kind(self).path(),
                    &mut state,
                );
                ::core::hash::Hash::hash(self, &mut state);
            }
        }
    };
    (unordered $ty:ty => $kind:expr) => {
        impl $crate::value::Container for $ty {
            $crate::value::impl_container!(@common $kind);

            fn container_cmp(&self, other: &dyn $crate::value::Container) -> ::core::cmp::Ordering {
                match $crate::value::Container::as_any(other).downcast_ref::<Self>() {
                    Some(other) => {
                        $crate::value::container::unordered_cmp(self.iter(), other.iter())
                    }
                    None => ::core::cmp::Ord::cmp(
                        &$crate::value::Container::container_type(self),
                        &$crate::value::Container::container_type(other),
                    ),
                }
            }

            fn container_hash(&self, mut state: &mut dyn ::core::hash::Hasher) {
                ::core::hash::Hash::hash(
                    $crate::value::Container::container_kind(self).path(),
                    &mut state,
                );
                $crate::value::container::unordered_hash(self.iter(), state);
            }
        }
    };
}

pub(crate) use impl_container;
