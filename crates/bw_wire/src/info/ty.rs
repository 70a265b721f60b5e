use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{ContainerKind, Typed};

// -----------------------------------------------------------------------------
// TypeKind

/// What a [`Type`] stands for.
///
/// The kind drives the few places where the core needs more than a name:
/// enum constants are encoded as their enum, containers are
/// matched against their [`ContainerKind`].
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// The dynamic type, any value may appear.
    Any,
    /// A scalar such as `i32` or `String`.
    Scalar,
    /// A structured value exposing named properties.
    Bean,
    /// An enumeration.
    Enum,
    /// A type generated for a single enumeration constant with its own body.
    ///
    /// Holds the enclosing enumeration.
    EnumConstant(Type),
    /// A container kind.
    Container(&'static ContainerKind),
}

// -----------------------------------------------------------------------------
// Type

struct TypeInner {
    path: Cow<'static, str>,
    kind: TypeKind,
}

/// A cheap-to-clone handle to a raw type identity.
///
/// Identity is the full type path: two `Type`s are equal if and only if
/// their [`path`](Type::path) is equal, the kind is descriptive only.
///
/// # Examples
///
/// ```
/// use bw_wire::info::{Type, TypeKind};
///
/// let ty = Type::bean("my_app::model::Person");
///
/// assert_eq!(ty.path(), "my_app::model::Person");
/// assert_eq!(ty.name(), "Person");
/// assert_eq!(ty.module_path(), Some("my_app::model"));
/// assert!(matches!(ty.kind(), TypeKind::Bean));
/// ```
#[derive(Clone)]
pub struct Type(Arc<TypeInner>);

impl Type {
    /// Creates a type with an explicit kind.
    pub fn new(path: impl Into<Cow<'static, str>>, kind: TypeKind) -> Self {
        let path = path.into();
        let path = match path.strip_prefix("::") {
            Some(stripped) => Cow::Owned(stripped.into()),
            None => path,
        };
        Self(Arc::new(TypeInner { path, kind }))
    }

    /// Creates a scalar type.
    #[inline]
    pub fn scalar(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, TypeKind::Scalar)
    }

    /// Creates a bean type.
    #[inline]
    pub fn bean(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, TypeKind::Bean)
    }

    /// Creates an enumeration type.
    #[inline]
    pub fn enumeration(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, TypeKind::Enum)
    }

    /// Creates the type of one enumeration constant that carries its own body.
    ///
    /// # Examples
    ///
    /// ```
    /// use bw_wire::info::Type;
    ///
    /// let op = Type::enumeration("calc::Op");
    /// let plus = Type::enum_constant("calc::Op::Plus", op.clone());
    ///
    /// assert_eq!(plus.enclosing_enum(), Some(&op));
    /// ```
    #[inline]
    pub fn enum_constant(path: impl Into<Cow<'static, str>>, enclosing: Type) -> Self {
        Self::new(path, TypeKind::EnumConstant(enclosing))
    }

    /// Creates the type of a container kind.
    ///
    /// Prefer [`ContainerKind::ty`], which caches the handle.
    #[inline]
    pub fn container(kind: &'static ContainerKind) -> Self {
        Self::new(kind.path(), TypeKind::Container(kind))
    }

    /// The dynamic type.
    ///
    /// This is the well-known `bw_wire::value::Value` type.
    #[inline]
    pub fn any() -> Self {
        crate::Value::type_descriptor().raw().clone()
    }

    /// Returns the full type path, never prefixed with `::`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.0.path
    }

    /// Returns the last path segment.
    ///
    /// For `my_app::model::Person`, this is `Person`.
    pub fn name(&self) -> &str {
        let path = self.path();
        match path.rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    /// Returns the module path, if any.
    ///
    /// Primitive types such as `i32` return `None`.
    pub fn module_path(&self) -> Option<&str> {
        let path = self.path();
        path.rfind("::").map(|index| &path[..index])
    }

    /// Returns the kind of this type.
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Returns `true` for the dynamic type.
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self.0.kind, TypeKind::Any)
    }

    /// Returns the container kind, if this is a container type.
    #[inline]
    pub fn container_kind(&self) -> Option<&'static ContainerKind> {
        match self.0.kind {
            TypeKind::Container(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns the enclosing enumeration, if this is an enum constant type.
    #[inline]
    pub fn enclosing_enum(&self) -> Option<&Type> {
        match &self.0.kind {
            TypeKind::EnumConstant(enclosing) => Some(enclosing),
            _ => None,
        }
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.path() == other.path()
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl PartialOrd for Type {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.path().cmp(other.path())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("path", &self.path())
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl fmt::Display for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn names() {
        let ty = Type::scalar("::alloc::string::String");
        assert_eq!(ty.path(), "alloc::string::String");
        assert_eq!(ty.name(), "String");
        assert_eq!(ty.module_path(), Some("alloc::string"));

        let ty = Type::scalar("i32");
        assert_eq!(ty.name(), "i32");
        assert_eq!(ty.module_path(), None);
    }

    #[test]
    fn identity_is_the_path() {
        assert_eq!(Type::bean("a::B"), Type::scalar("a::B"));
        assert_ne!(Type::bean("a::B"), Type::bean("a::C"));
        assert!(Type::any().is_any());
    }
}
