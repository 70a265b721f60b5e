use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::Value;
use crate::container::ContainerError;
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor, Typed};
use crate::value::{Container, impl_container};

// -----------------------------------------------------------------------------
// ValueArray

/// A fixed-length array of values with a declared element type.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::base::ValueArray;
/// use bw_wire::info::Typed;
///
/// let array = ValueArray::new(String::type_descriptor(), vec![Value::from("a")]);
/// assert_eq!(array.element_type().raw().name(), "String");
/// assert_eq!(array.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueArray {
    element: TypeDescriptor,
    values: Vec<Value>,
}

impl ValueArray {
    #[inline]
    pub fn new(element: TypeDescriptor, values: Vec<Value>) -> Self {
        Self { element, values }
    }

    #[inline]
    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl_container!(ordered ValueArray => &super::ARRAY);

// -----------------------------------------------------------------------------
// PrimitiveArray

macro_rules! primitive_arrays {
    ($($variant:ident($ty:ty) => $kind:ident, $tag:literal, $path:literal;)*) => {
        $(
            #[doc = concat!("The kind of `", $tag, "` arrays.")]
            pub static $kind: ContainerKind =
                ContainerKind::new($tag, $path, ContainerCategory::List, 0);
        )*

        /// Every primitive array kind.
        pub static PRIMITIVE_KINDS: &[&ContainerKind] = &[$(&$kind),*];

        /// An array of unboxed primitives.
        ///
        /// Format writers usually emit these as binary blobs; a cursor that
        /// boxes each element is only created when
        /// [`ReadOptions::box_primitive_arrays`](crate::container::ReadOptions)
        /// is set.
        #[derive(Debug, Clone)]
        pub enum PrimitiveArray {
            $($variant(Vec<$ty>),)*
        }

        impl PrimitiveArray {
            /// Creates an empty array for a primitive array kind.
            pub fn empty(kind: &'static ContainerKind) -> Option<Self> {
                $(
                    if kind == &$kind {
                        return Some(Self::$variant(Vec::new()));
                    }
                )*
                None
            }

            /// Returns the kind of this array.
            pub fn kind(&self) -> &'static ContainerKind {
                match self {
                    $(Self::$variant(_) => &$kind,)*
                }
            }

            /// Returns the element type.
            pub fn element_type(&self) -> TypeDescriptor {
                match self {
                    $(Self::$variant(_) => <$ty>::type_descriptor(),)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(v) => v.len(),)*
                }
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Returns element `index` boxed as a [`Value`].
            pub fn get(&self, index: usize) -> Option<Value> {
                match self {
                    $(Self::$variant(v) => v.get(index).map(|&x| Value::$variant(x)),)*
                }
            }

            /// Iterates over the elements, boxing each one.
            pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
                (0..self.len()).filter_map(|index| self.get(index))
            }

            /// Appends a boxed element of the matching type.
            pub fn push(&mut self, value: Value) -> Result<(), ContainerError> {
                match (self, value) {
                    $((Self::$variant(v), Value::$variant(x)) => {
                        v.push(x);
                        Ok(())
                    })*
                    (this, value) => Err(ContainerError::ElementType {
                        tag: this.kind().tag(),
                        found: value.value_type(),
                    }),
                }
            }
        }

        $(
            impl From<Vec<$ty>> for PrimitiveArray {
                #[inline]
                fn from(value: Vec<$ty>) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

primitive_arrays! {
    Bool(bool) => BOOL_ARRAY, "bool[]", "[bool]";
    Char(char) => CHAR_ARRAY, "char[]", "[char]";
    I8(i8) => I8_ARRAY, "i8[]", "[i8]";
    I16(i16) => I16_ARRAY, "i16[]", "[i16]";
    I32(i32) => I32_ARRAY, "i32[]", "[i32]";
    I64(i64) => I64_ARRAY, "i64[]", "[i64]";
    U8(u8) => U8_ARRAY, "u8[]", "[u8]";
    U16(u16) => U16_ARRAY, "u16[]", "[u16]";
    U32(u32) => U32_ARRAY, "u32[]", "[u32]";
    U64(u64) => U64_ARRAY, "u64[]", "[u64]";
    F32(f32) => F32_ARRAY, "f32[]", "[f32]";
    F64(f64) => F64_ARRAY, "f64[]", "[f64]";
}

impl PartialEq for PrimitiveArray {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PrimitiveArray {}

impl PartialOrd for PrimitiveArray {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrimitiveArray {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .tag()
            .cmp(other.kind().tag())
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl Hash for PrimitiveArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().tag().hash(state);
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl Container for PrimitiveArray {
    #[inline]
    fn container_kind(&self) -> &'static ContainerKind {
        self.kind()
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn clone_container(&self) -> Box<dyn Container> {
        Box::new(self.clone())
    }

    fn container_eq(&self, other: &dyn Container) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| self == other)
    }

    fn container_cmp(&self, other: &dyn Container) -> Ordering {
        match other.downcast_ref::<Self>() {
            Some(other) => self.cmp(other),
            None => self.container_type().cmp(&other.container_type()),
        }
    }

    fn container_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}
