//! The dynamic runtime value model.
//!
//! Every value the core touches is a [`Value`]: a scalar, an enumeration
//! constant, a bean or a container. Values are totally ordered and hashable
//! so any of them may be used as a set element or a map key.

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod container;

// -----------------------------------------------------------------------------
// Exports

pub use container::Container;
pub(crate) use container::impl_container;

// -----------------------------------------------------------------------------
// Value

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::bean::Bean;
use crate::info::{Type, Typed};

/// A dynamic runtime value.
///
/// Floats are compared with [`f64::total_cmp`] and hashed by their bit
/// pattern, so `Value` is `Eq + Ord + Hash` without exceptions.
///
/// Values of different variants are ordered by variant, in declaration order.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
///
/// let a = Value::from(1_i32);
/// let b = Value::from("one");
///
/// assert!(a < b);
/// assert_eq!(a.value_type().path(), "i32");
/// assert_eq!(b.as_str(), Some("one"));
/// assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    /// An enumeration constant: the enum type and the constant name.
    Enum(Type, String),
    Bean(Box<dyn Bean>),
    Container(Box<dyn Container>),
}

impl Value {
    /// Wraps a container.
    #[inline]
    pub fn container(container: impl Container) -> Self {
        Self::Container(Box::new(container))
    }

    /// Wraps a bean.
    #[inline]
    pub fn bean(bean: impl Bean) -> Self {
        Self::Bean(Box::new(bean))
    }

    /// Creates an enumeration constant.
    #[inline]
    pub fn enumeration(ty: Type, name: impl Into<String>) -> Self {
        Self::Enum(ty, name.into())
    }

    /// Returns the runtime type of the value.
    ///
    /// `Null` reports the untyped [`Type::any`].
    pub fn value_type(&self) -> Type {
        match self {
            Self::Null => Type::any(),
            Self::Bool(_) => bool::type_descriptor().raw().clone(),
            Self::Char(_) => char::type_descriptor().raw().clone(),
            Self::I8(_) => i8::type_descriptor().raw().clone(),
            Self::I16(_) => i16::type_descriptor().raw().clone(),
            Self::I32(_) => i32::type_descriptor().raw().clone(),
            Self::I64(_) => i64::type_descriptor().raw().clone(),
            Self::U8(_) => u8::type_descriptor().raw().clone(),
            Self::U16(_) => u16::type_descriptor().raw().clone(),
            Self::U32(_) => u32::type_descriptor().raw().clone(),
            Self::U64(_) => u64::type_descriptor().raw().clone(),
            Self::F32(_) => f32::type_descriptor().raw().clone(),
            Self::F64(_) => f64::type_descriptor().raw().clone(),
            Self::String(_) => String::type_descriptor().raw().clone(),
            Self::Enum(ty, _) => ty.clone(),
            Self::Bean(bean) => bean.meta_bean().bean_type(),
            Self::Container(container) => container.container_type(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns any integer variant widened to `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns any integer variant as a `usize` index, if non-negative.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        self.as_i64().and_then(|v| usize::try_from(v).ok())
    }

    #[inline]
    pub fn as_bean(&self) -> Option<&dyn Bean> {
        match self {
            Self::Bean(v) => Some(&**v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_container(&self) -> Option<&dyn Container> {
        match self {
            Self::Container(v) => Some(&**v),
            _ => None,
        }
    }

    /// Downcasts a container value to a concrete container.
    #[inline]
    pub fn downcast_container<T: Container>(&self) -> Option<&T> {
        self.as_container()?.downcast_ref::<T>()
    }

    /// Position of the variant, used to order values of different variants.
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Char(_) => 2,
            Self::I8(_) => 3,
            Self::I16(_) => 4,
            Self::I32(_) => 5,
            Self::I64(_) => 6,
            Self::U8(_) => 7,
            Self::U16(_) => 8,
            Self::U32(_) => 9,
            Self::U64(_) => 10,
            Self::F32(_) => 11,
            Self::F64(_) => 12,
            Self::String(_) => 13,
            Self::Enum(..) => 14,
            Self::Bean(_) => 15,
            Self::Container(_) => 16,
        }
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::I8(a), Self::I8(b)) => a.cmp(b),
            (Self::I16(a), Self::I16(b)) => a.cmp(b),
            (Self::I32(a), Self::I32(b)) => a.cmp(b),
            (Self::I64(a), Self::I64(b)) => a.cmp(b),
            (Self::U8(a), Self::U8(b)) => a.cmp(b),
            (Self::U16(a), Self::U16(b)) => a.cmp(b),
            (Self::U32(a), Self::U32(b)) => a.cmp(b),
            (Self::U64(a), Self::U64(b)) => a.cmp(b),
            (Self::F32(a), Self::F32(b)) => a.total_cmp(b),
            (Self::F64(a), Self::F64(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Enum(ta, na), Self::Enum(tb, nb)) => ta.cmp(tb).then_with(|| na.cmp(nb)),
            (Self::Bean(a), Self::Bean(b)) => crate::bean::bean_cmp(&**a, &**b),
            (Self::Container(a), Self::Container(b)) => a.container_cmp(&**b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::I8(v) => v.hash(state),
            Self::I16(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::U8(v) => v.hash(state),
            Self::U16(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::F32(v) => v.to_bits().hash(state),
            Self::F64(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Enum(ty, name) => {
                ty.hash(state);
                name.hash(state);
            }
            Self::Bean(v) => crate::bean::bean_hash(&**v, state),
            Self::Container(v) => v.container_hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::String(v) => fmt::Debug::fmt(v, f),
            Self::Enum(ty, name) => write!(f, "{}::{name}", ty.name()),
            Self::Bean(v) => fmt::Debug::fmt(v, f),
            Self::Container(v) => fmt::Debug::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident,)*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Box<dyn Container>> for Value {
    #[inline]
    fn from(value: Box<dyn Container>) -> Self {
        Self::Container(value)
    }
}

impl From<Box<dyn Bean>> for Value {
    #[inline]
    fn from(value: Box<dyn Bean>) -> Self {
        Self::Bean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Value;
    use crate::info::Type;

    #[test]
    fn variant_order() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2_i32),
            Value::Null,
            Value::from(true),
            Value::from(1_i32),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::from(true),
                Value::from(1_i32),
                Value::from(2_i32),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn floats_are_total() {
        assert_eq!(Value::F32(f32::NAN), Value::F32(f32::NAN));
        assert_ne!(Value::F64(0.0), Value::F64(-0.0));
        assert_eq!(
            bw_utils::hash::hash_one(&Value::F64(1.5)),
            bw_utils::hash::hash_one(&Value::F64(1.5)),
        );
    }

    #[test]
    fn containers_compare_by_content() {
        let a = Value::container(vec![Value::from(1_i32)]);
        let b = Value::container(vec![Value::from(1_i32)]);
        let c = Value::container(Vec::<Value>::new());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(bw_utils::hash::hash_one(&a), bw_utils::hash::hash_one(&b));
        assert_eq!(a.value_type(), crate::container::base::LIST.ty());
    }

    #[test]
    fn enum_values() {
        let ty = Type::enumeration("calc::Op");
        let plus = Value::enumeration(ty.clone(), "Plus");
        assert_eq!(plus.value_type(), ty);
        assert_eq!(plus.to_string(), "Op::Plus");
    }

    #[test]
    fn integer_widening() {
        assert_eq!(Value::from(7_u8).as_i64(), Some(7));
        assert_eq!(Value::U64(u64::MAX).as_i64(), None);
        assert_eq!(Value::from(-1_i32).as_index(), None);
        assert_eq!(Value::from(3_i16).as_index(), Some(3));
    }
}
