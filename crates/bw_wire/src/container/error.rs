use alloc::string::String;

use thiserror::Error;

use crate::info::Type;

/// A contract violation while filling a [`WriteContainer`](crate::container::WriteContainer).
///
/// These errors are always returned to the caller, a builder never
/// silently drops an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContainerError {
    /// A key was supplied to a container whose entries have none.
    #[error("`{tag}` entries do not take a key")]
    UnexpectedKey { tag: &'static str },
    /// A column was supplied to a container whose entries have none.
    #[error("`{tag}` entries do not take a column")]
    UnexpectedColumn { tag: &'static str },
    /// A keyed entry was supplied without a key.
    #[error("`{tag}` entries require a key")]
    MissingKey { tag: &'static str },
    /// A table or grid entry was supplied without a column.
    #[error("`{tag}` entries require a column")]
    MissingColumn { tag: &'static str },
    /// The count is zero, or not one for an uncounted container.
    #[error("invalid count {count} for `{tag}`")]
    InvalidCount { tag: &'static str, count: u32 },
    /// A bidirectional map received the same value under two keys.
    #[error("`{tag}` already maps another key to value {value}")]
    DuplicateValue { tag: &'static str, value: String },
    /// A grid row or column is not a non-negative integer.
    #[error("`{tag}` index {value} is not a non-negative integer")]
    InvalidIndex { tag: &'static str, value: String },
    /// A grid cell lies outside the grid.
    #[error("`{tag}` cell ({row}, {column}) is outside {rows}x{columns}")]
    OutOfBounds {
        tag: &'static str,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// Grid dimensions were malformed.
    #[error("`{tag}` expects 2 dimensions, got {found}")]
    InvalidDimensions { tag: &'static str, found: usize },
    /// A grid has more cells than can be allocated.
    #[error("`{tag}` of {rows}x{columns} cells cannot be allocated")]
    TooLarge {
        tag: &'static str,
        rows: usize,
        columns: usize,
    },
    /// A primitive array received a value of another type.
    #[error("`{tag}` cannot hold a value of type `{found}`")]
    ElementType { tag: &'static str, found: Type },
}
