//! The fixed table of well-known types.
//!
//! Well-known types are always written with a short, fixed token regardless
//! of the compact mode, and no other type may claim one of these tokens.
//!
//! | token        | path                                  |
//! |--------------|---------------------------------------|
//! | `String`     | `alloc::string::String`               |
//! | `i8`..`i128` | primitive integers                    |
//! | `u8`..`u128` | primitive unsigned integers           |
//! | `f32`, `f64` | primitive floats                      |
//! | `bool`       | `bool`                                |
//! | `char`       | `char`                                |
//! | `BigInt`     | `num_bigint::BigInt`                  |
//! | `BigDecimal` | `bigdecimal::BigDecimal`              |
//! | `Locale`     | `unic_langid::LanguageIdentifier`     |
//! | `Type`       | `bw_wire::info::TypeDescriptor`       |
//! | `Uuid`       | `uuid::Uuid`                          |
//! | `Url`        | `url::Url`                            |
//! | `PathBuf`    | `std::path::PathBuf`                  |
//! | `Value`      | `bw_wire::value::Value` (untyped)     |
//!
//! # Examples
//!
//! ```
//! use bw_wire::info::known;
//!
//! let ty = known::type_for_token("Locale").unwrap();
//! assert_eq!(ty.path(), "unic_langid::LanguageIdentifier");
//! assert_eq!(known::token_for(&ty), Some("Locale"));
//! assert!(known::is_known_token("i32"));
//! assert!(!known::is_known_token("Person"));
//! ```

use alloc::vec::Vec;
use std::sync::LazyLock;

use bw_utils::hash::HashMap;

use crate::info::{Type, TypeDescriptor, TypeKind};

// -----------------------------------------------------------------------------
// Table

const ENTRIES: &[(&str, &str)] = &[
    ("String", "alloc::string::String"),
    ("i8", "i8"),
    ("i16", "i16"),
    ("i32", "i32"),
    ("i64", "i64"),
    ("i128", "i128"),
    ("u8", "u8"),
    ("u16", "u16"),
    ("u32", "u32"),
    ("u64", "u64"),
    ("u128", "u128"),
    ("f32", "f32"),
    ("f64", "f64"),
    ("bool", "bool"),
    ("char", "char"),
    ("BigInt", "num_bigint::BigInt"),
    ("BigDecimal", "bigdecimal::BigDecimal"),
    ("Locale", "unic_langid::LanguageIdentifier"),
    ("Type", "bw_wire::info::TypeDescriptor"),
    ("Uuid", "uuid::Uuid"),
    ("Url", "url::Url"),
    ("PathBuf", "std::path::PathBuf"),
    ("Value", VALUE_PATH),
];

const VALUE_PATH: &str = "bw_wire::value::Value";

struct KnownTable {
    by_token: HashMap<&'static str, Type>,
    by_path: HashMap<&'static str, &'static str>,
    ordered: Vec<(&'static str, Type)>,
}

static TABLE: LazyLock<KnownTable> = LazyLock::new(|| {
    let mut by_token = HashMap::default();
    let mut by_path = HashMap::default();
    let mut ordered = Vec::with_capacity(ENTRIES.len());

    for &(token, path) in ENTRIES {
        let kind = if path == VALUE_PATH {
            TypeKind::Any
        } else {
            TypeKind::Scalar
        };
        let ty = Type::new(path, kind);
        by_token.insert(token, ty.clone());
        by_path.insert(path, token);
        ordered.push((token, ty));
    }

    KnownTable {
        by_token,
        by_path,
        ordered,
    }
});

// -----------------------------------------------------------------------------
// Lookup

/// Returns the fixed token of a well-known type.
#[inline]
pub fn token_for(ty: &Type) -> Option<&'static str> {
    TABLE.by_path.get(ty.path()).copied()
}

/// Returns the well-known type of a token.
#[inline]
pub fn type_for_token(token: &str) -> Option<Type> {
    TABLE.by_token.get(token).cloned()
}

/// Returns the well-known type stored under a full path.
#[inline]
pub fn type_for_path(path: &str) -> Option<Type> {
    let token = TABLE.by_path.get(path)?;
    type_for_token(token)
}

/// Returns `true` if the token is reserved by a well-known type.
#[inline]
pub fn is_known_token(token: &str) -> bool {
    TABLE.by_token.contains_key(token)
}

/// Iterates over `(token, type)` in table order.
pub fn iter() -> impl Iterator<Item = (&'static str, &'static Type)> {
    let table: &'static KnownTable = &TABLE;
    table.ordered.iter().map(|(token, ty)| (*token, ty))
}

/// Descriptor of a well-known path, used by the scalar `Typed` impls.
pub(crate) fn descriptor_for_path(path: &'static str) -> TypeDescriptor {
    match type_for_path(path) {
        Some(ty) => TypeDescriptor::of(ty),
        None => TypeDescriptor::of(Type::scalar(path)),
    }
}
