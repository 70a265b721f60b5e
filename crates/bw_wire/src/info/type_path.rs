use alloc::string::String;

use crate::info::{TypeDescriptor, known};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to the path of a non-generic type.
///
/// We guarantee that these names do not have the prefix `::`.
/// Users should also ensure this when manually implementing it.
///
/// # Examples
///
/// ```
/// use bw_wire::info::TypePath;
///
/// struct Person;
///
/// impl TypePath for Person {
///     fn type_path() -> &'static str { "my_app::model::Person" }
///     fn type_name() -> &'static str { "Person" }
///     fn module_path() -> Option<&'static str> { Some("my_app::model") }
/// }
///
/// assert_eq!(<String as TypePath>::type_path(), "alloc::string::String");
/// assert_eq!(<i32 as TypePath>::module_path(), None);
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    ///
    /// For `String`, this is `"alloc::string::String"`.
    fn type_path() -> &'static str;

    /// Returns the last segment of the path.
    ///
    /// For `String`, this is `"String"`.
    fn type_name() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Primitive built-in types return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the full [`TypeDescriptor`] of a type.
///
/// Unlike [`TypePath`], generic arguments are included, so
/// `Vec<String>` describes itself as `List<String>`.
///
/// # Examples
///
/// ```
/// use bw_wire::info::{Type, TypeDescriptor, Typed};
///
/// struct Person;
///
/// impl Typed for Person {
///     fn type_descriptor() -> TypeDescriptor {
///         TypeDescriptor::of(Type::bean("my_app::model::Person"))
///     }
/// }
///
/// assert_eq!(Person::type_descriptor().raw().name(), "Person");
/// ```
pub trait Typed {
    /// Returns the descriptor of `Self`.
    fn type_descriptor() -> TypeDescriptor;
}

// -----------------------------------------------------------------------------
// Scalar implementations

macro_rules! impl_scalar {
    ($($ty:ty => $path:literal, $name:literal, $module:expr;)*) => {
        $(
            impl TypePath for $ty {
                #[inline(always)]
                fn type_path() -> &'static str { $path }
                #[inline(always)]
                fn type_name() -> &'static str { $name }
                #[inline(always)]
                fn module_path() -> Option<&'static str> { $module }
            }

            impl Typed for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    known::descriptor_for_path($path)
                }
            }
        )*
    };
}

impl_scalar! {
    String => "alloc::string::String", "String", Some("alloc::string");
    bool => "bool", "bool", None;
    char => "char", "char", None;
    i8 => "i8", "i8", None;
    i16 => "i16", "i16", None;
    i32 => "i32", "i32", None;
    i64 => "i64", "i64", None;
    i128 => "i128", "i128", None;
    u8 => "u8", "u8", None;
    u16 => "u16", "u16", None;
    u32 => "u32", "u32", None;
    u64 => "u64", "u64", None;
    u128 => "u128", "u128", None;
    f32 => "f32", "f32", None;
    f64 => "f64", "f64", None;
    std::path::PathBuf => "std::path::PathBuf", "PathBuf", Some("std::path");
    TypeDescriptor => "bw_wire::info::TypeDescriptor", "TypeDescriptor", Some("bw_wire::info");
    crate::Value => "bw_wire::value::Value", "Value", Some("bw_wire::value");
}
