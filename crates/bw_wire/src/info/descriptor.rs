use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{ContainerKind, Type};

/// A raw [`Type`] plus its ordered generic arguments.
///
/// Descriptors are immutable once built and cheap to clone. Two descriptors
/// are equal if the raw types and all arguments are recursively equal.
///
/// # Examples
///
/// ```
/// use bw_wire::info::{TypeDescriptor, Typed};
///
/// let desc = <Vec<String>>::type_descriptor();
///
/// assert_eq!(desc.raw().name(), "Vec");
/// assert_eq!(desc.args().len(), 1);
/// assert_eq!(desc.to_string(), "alloc::vec::Vec<alloc::string::String>");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    raw: Type,
    args: Arc<[TypeDescriptor]>,
}

impl TypeDescriptor {
    /// Creates a descriptor with generic arguments.
    pub fn new(raw: Type, args: impl Into<Vec<TypeDescriptor>>) -> Self {
        Self {
            raw,
            args: args.into().into(),
        }
    }

    /// Creates a descriptor without generic arguments.
    #[inline]
    pub fn of(raw: Type) -> Self {
        Self {
            raw,
            args: Arc::new([]),
        }
    }

    /// The untyped descriptor, any value may appear.
    #[inline]
    pub fn any() -> Self {
        Self::of(Type::any())
    }

    /// Returns the raw type.
    #[inline]
    pub fn raw(&self) -> &Type {
        &self.raw
    }

    /// Returns the generic arguments, possibly empty.
    #[inline]
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    /// Returns the argument at `index`, or [`any`](Self::any) if absent.
    pub fn arg_or_any(&self, index: usize) -> TypeDescriptor {
        self.args.get(index).cloned().unwrap_or_else(Self::any)
    }

    /// Returns the arguments if exactly `arity` are present,
    /// otherwise `arity` untyped arguments.
    ///
    /// A container factory uses the declared arguments only when they
    /// match its own kind, so a `Map<K, V>` declaration never leaks its
    /// key type into a list.
    ///
    /// ```
    /// use bw_wire::info::{TypeDescriptor, Typed};
    ///
    /// let desc = <Vec<i32>>::type_descriptor();
    /// assert_eq!(desc.args_for_arity(1), vec![i32::type_descriptor()]);
    /// assert_eq!(desc.args_for_arity(2), vec![TypeDescriptor::any(); 2]);
    /// ```
    pub fn args_for_arity(&self, arity: usize) -> Vec<TypeDescriptor> {
        if self.args.len() == arity {
            self.args.to_vec()
        } else {
            alloc::vec![Self::any(); arity]
        }
    }

    /// Returns `true` for the untyped descriptor.
    #[inline]
    pub fn is_any(&self) -> bool {
        self.raw.is_any()
    }

    /// Returns the container kind of the raw type, if any.
    #[inline]
    pub fn container_kind(&self) -> Option<&'static ContainerKind> {
        self.raw.container_kind()
    }
}

impl From<Type> for TypeDescriptor {
    #[inline]
    fn from(raw: Type) -> Self {
        Self::of(raw)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw.path())?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ",{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeDescriptor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self})")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::TypeDescriptor;
    use crate::info::{Type, Typed};

    #[test]
    fn equality_is_recursive() {
        let a = TypeDescriptor::new(Type::bean("a::Box"), [i32::type_descriptor()]);
        let b = TypeDescriptor::new(Type::bean("a::Box"), [i32::type_descriptor()]);
        let c = TypeDescriptor::new(Type::bean("a::Box"), [String::type_descriptor()]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, TypeDescriptor::of(Type::bean("a::Box")));
    }

    #[test]
    fn display_nested() {
        let desc = <Vec<Vec<bool>>>::type_descriptor();
        assert_eq!(desc.to_string(), "alloc::vec::Vec<alloc::vec::Vec<bool>>");
    }

    #[test]
    fn missing_args() {
        let desc = TypeDescriptor::of(Type::bean("a::B"));
        assert!(desc.arg_or_any(0).is_any());
        assert_eq!(desc.args_for_arity(0), Vec::new());
    }
}
