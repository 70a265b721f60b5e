use core::fmt;
use std::sync::OnceLock;

use crate::info::Type;

// -----------------------------------------------------------------------------
// ContainerCategory

/// The shape of a container.
///
/// The category decides which of key, column, value and count are
/// meaningful for each entry of a container.
///
/// | category  | key        | column     | count |
/// |-----------|------------|------------|-------|
/// | `List`    | -          | -          | 1     |
/// | `Set`     | -          | -          | 1     |
/// | `Counted` | -          | -          | >= 1  |
/// | `Map`     | required   | -          | 1     |
/// | `Table`   | row key    | column key | 1     |
/// | `Grid`    | row index  | col index  | 1     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerCategory {
    List,
    Set,
    Map,
    Table,
    Counted,
    Grid,
}

impl ContainerCategory {
    /// Returns `true` if entries carry a key (row for tables and grids).
    #[inline]
    pub const fn uses_key(self) -> bool {
        matches!(self, Self::Map | Self::Table | Self::Grid)
    }

    /// Returns `true` if entries carry a column.
    #[inline]
    pub const fn uses_column(self) -> bool {
        matches!(self, Self::Table | Self::Grid)
    }

    /// Returns `true` if entries carry a count other than one.
    #[inline]
    pub const fn uses_count(self) -> bool {
        matches!(self, Self::Counted)
    }

    /// Returns the number of dimensions reported by `dimension_size`.
    #[inline]
    pub const fn dimensions(self) -> usize {
        match self {
            Self::Table | Self::Grid => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for ContainerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.pad("List"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
            Self::Table => f.pad("Table"),
            Self::Counted => f.pad("Counted"),
            Self::Grid => f.pad("Grid"),
        }
    }
}

// -----------------------------------------------------------------------------
// ContainerKind

/// Static description of one container kind.
///
/// A kind is either concrete (the reader can build it directly) or abstract,
/// in which case [`default_kind`](Self::default_kind) names the concrete kind
/// a reader builds when only the abstract kind is known.
///
/// Kinds live in statics so that `&'static ContainerKind` can be stored
/// inside [`Type`] handles.
///
/// # Examples
///
/// ```
/// use bw_wire::info::{ContainerCategory, ContainerKind};
///
/// static RING: ContainerKind =
///     ContainerKind::new("Ring", "my_app::Ring", ContainerCategory::List, 1);
///
/// assert_eq!(RING.tag(), "Ring");
/// assert_eq!(RING.ty().path(), "my_app::Ring");
/// assert!(core::ptr::eq(RING.default_kind(), &RING));
/// ```
pub struct ContainerKind {
    tag: &'static str,
    path: &'static str,
    category: ContainerCategory,
    arity: usize,
    default: Option<&'static ContainerKind>,
    ty: OnceLock<Type>,
}

impl ContainerKind {
    /// Creates a concrete kind.
    ///
    /// `arity` is the number of generic arguments the declared type carries,
    /// `1` for lists (element), `2` for maps (key, value), `3` for tables.
    pub const fn new(
        tag: &'static str,
        path: &'static str,
        category: ContainerCategory,
        arity: usize,
    ) -> Self {
        Self {
            tag,
            path,
            category,
            arity,
            default: None,
            ty: OnceLock::new(),
        }
    }

    /// Creates an abstract kind built as `default` by readers.
    pub const fn with_default(
        tag: &'static str,
        path: &'static str,
        default: &'static ContainerKind,
    ) -> Self {
        Self {
            tag,
            path,
            category: default.category,
            arity: default.arity,
            default: Some(default),
            ty: OnceLock::new(),
        }
    }

    /// Returns the wire tag, e.g. `SortedMap`.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the type path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the category.
    #[inline]
    pub const fn category(&self) -> ContainerCategory {
        self.category
    }

    /// Returns the number of generic arguments of the declared type.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns `true` if readers cannot build this kind directly.
    #[inline]
    pub const fn is_abstract(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the concrete kind built for this kind, `self` if concrete.
    #[inline]
    pub fn default_kind(&'static self) -> &'static ContainerKind {
        match self.default {
            Some(default) => default,
            None => self,
        }
    }

    /// Returns the cached [`Type`] of this kind.
    pub fn ty(&'static self) -> Type {
        self.ty.get_or_init(|| Type::container(self)).clone()
    }

    /// Returns `true` if `ty` is this kind.
    #[inline]
    pub fn is(&self, ty: &Type) -> bool {
        ty.path() == self.path
    }
}

impl PartialEq for ContainerKind {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ContainerKind {}

impl fmt::Debug for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerKind")
            .field("tag", &self.tag)
            .field("path", &self.path)
            .field("category", &self.category)
            .field("arity", &self.arity)
            .field("default", &self.default.map(|kind| kind.tag))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerCategory, ContainerKind};

    static CONCRETE: ContainerKind =
        ContainerKind::new("Bag", "test::Bag", ContainerCategory::Counted, 1);
    static ABSTRACT: ContainerKind =
        ContainerKind::with_default("AnyBag", "test::AnyBag", &CONCRETE);

    #[test]
    fn abstract_kinds() {
        assert!(!CONCRETE.is_abstract());
        assert!(ABSTRACT.is_abstract());
        assert_eq!(ABSTRACT.default_kind(), &CONCRETE);
        assert_eq!(ABSTRACT.category(), ContainerCategory::Counted);
        assert_eq!(ABSTRACT.arity(), 1);
    }

    #[test]
    fn cached_type() {
        let a = CONCRETE.ty();
        let b = CONCRETE.ty();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.container_kind(), Some(&CONCRETE));
    }

    #[test]
    fn category_shape() {
        assert!(!ContainerCategory::List.uses_key());
        assert!(ContainerCategory::Map.uses_key());
        assert!(ContainerCategory::Grid.uses_column());
        assert!(ContainerCategory::Counted.uses_count());
        assert_eq!(ContainerCategory::Table.dimensions(), 2);
    }
}
