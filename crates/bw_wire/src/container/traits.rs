use alloc::boxed::Box;

use crate::Value;
use crate::container::ContainerError;
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// ReadOptions

/// Options for creating read cursors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Iterate primitive arrays element by element, boxing each element
    /// as a [`Value`].
    ///
    /// When `false`, factories decline primitive arrays and the format
    /// writer is expected to emit them as opaque binary blobs.
    pub box_primitive_arrays: bool,
}

// -----------------------------------------------------------------------------
// ReadContainer

/// A single-pass cursor over an existing container.
///
/// The cursor starts before the first entry: call
/// [`has_next`](Self::has_next) and [`advance`](Self::advance) before
/// reading the current entry.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::{FactoryChain, ReadOptions};
/// use bw_wire::info::{TypeDescriptor, Typed};
///
/// let value = Value::container(vec![Value::from(1_i32), Value::from(2_i32)]);
/// let declared = <Vec<i32>>::type_descriptor();
///
/// let mut cursor = FactoryChain::standard()
///     .read(&value, &declared, ReadOptions::default())
///     .unwrap();
///
/// assert_eq!(cursor.meta_tag(), "List");
/// assert!(!cursor.meta_type_required());
/// assert_eq!(cursor.size(), Some(2));
///
/// let mut seen = Vec::new();
/// while cursor.has_next() {
///     cursor.advance();
///     seen.push(cursor.value().cloned().unwrap());
/// }
/// assert_eq!(seen, [Value::from(1_i32), Value::from(2_i32)]);
/// ```
pub trait ReadContainer {
    /// Returns the category of the runtime container.
    fn category(&self) -> ContainerCategory;

    /// Returns the static kind of the runtime container.
    fn kind(&self) -> &'static ContainerKind;

    /// Returns the wire tag of the runtime container.
    #[inline]
    fn meta_tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Returns the runtime type written when the tag alone cannot rebuild
    /// the container, such as an `Array` and its element type.
    ///
    /// Defaults to the kind's raw type without arguments.
    #[inline]
    fn meta_type(&self) -> TypeDescriptor {
        TypeDescriptor::of(self.kind().ty())
    }

    /// Returns `true` if the writer must emit [`meta_tag`](Self::meta_tag),
    /// because the declared type does not already imply the runtime kind.
    fn meta_type_required(&self) -> bool;

    /// Returns the number of entries, `None` if unknown.
    ///
    /// Counted containers report distinct elements.
    fn size(&self) -> Option<usize>;

    /// Returns the size of one dimension of a table or grid.
    ///
    /// For tables, dimension `0` is the number of distinct row keys and
    /// dimension `1` the number of distinct column keys.
    fn dimension_size(&self, _dimension: usize) -> Option<usize> {
        None
    }

    /// Declared type of keys (row keys for tables and grids).
    fn key_type(&self) -> TypeDescriptor;

    /// Declared type of columns.
    fn column_type(&self) -> TypeDescriptor;

    /// Declared type of values.
    fn value_type(&self) -> TypeDescriptor;

    /// Returns `true` if another entry follows the current one.
    fn has_next(&mut self) -> bool;

    /// Moves to the next entry.
    fn advance(&mut self);

    /// Key of the current entry.
    fn key(&self) -> Option<&Value>;

    /// Column of the current entry.
    fn column(&self) -> Option<&Value>;

    /// Value of the current entry.
    fn value(&self) -> Option<&Value>;

    /// Count of the current entry, `1` unless the category is counted.
    fn count(&self) -> u32;

    /// Random access into a dense grid.
    fn value_at(&self, _row: usize, _column: usize) -> Option<&Value> {
        None
    }
}

// -----------------------------------------------------------------------------
// WriteContainer

/// A single-use builder of a container.
///
/// Entries are added with [`add`](Self::add) and the container is created by
/// [`build`](Self::build), which consumes the builder.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::FactoryChain;
/// use bw_wire::info::{TypeDescriptor, Typed};
///
/// let declared = <std::collections::BTreeMap<String, i32>>::type_descriptor();
/// let mut builder = FactoryChain::standard().write_for_type(&declared).unwrap();
///
/// builder.add_entry(Value::from("a"), Value::from(1_i32)).unwrap();
/// assert!(builder.add_value(Value::from(2_i32)).is_err());
///
/// let map = builder.build();
/// assert_eq!(map.as_container().map(|c| c.len()), Some(1));
/// ```
pub trait WriteContainer: Send {
    /// Returns the category of the container being built.
    fn category(&self) -> ContainerCategory;

    /// Returns the kind of the container being built.
    fn kind(&self) -> &'static ContainerKind;

    /// Declared type of keys.
    fn key_type(&self) -> TypeDescriptor;

    /// Declared type of columns.
    fn column_type(&self) -> TypeDescriptor;

    /// Declared type of values.
    fn value_type(&self) -> TypeDescriptor;

    /// Supplies the dimensions read from the wire, for grids.
    fn dimensions(&mut self, _dimensions: &[usize]) -> Result<(), ContainerError> {
        Ok(())
    }

    /// Adds one entry.
    ///
    /// `key` and `column` must be present exactly when the category uses
    /// them, `count` must be `1` unless the category is counted.
    fn add(
        &mut self,
        key: Option<Value>,
        column: Option<Value>,
        value: Value,
        count: u32,
    ) -> Result<(), ContainerError>;

    /// Builds the container.
    fn build(self: Box<Self>) -> Value;
}

impl dyn WriteContainer {
    /// Adds a single value to a list, set or counted container.
    #[inline]
    pub fn add_value(&mut self, value: Value) -> Result<(), ContainerError> {
        self.add(None, None, value, 1)
    }

    /// Adds a key and value to a map.
    #[inline]
    pub fn add_entry(&mut self, key: Value, value: Value) -> Result<(), ContainerError> {
        self.add(Some(key), None, value, 1)
    }

    /// Adds a cell to a table or grid.
    #[inline]
    pub fn add_cell(
        &mut self,
        row: Value,
        column: Value,
        value: Value,
    ) -> Result<(), ContainerError> {
        self.add(Some(row), Some(column), value, 1)
    }

    /// Adds `count` occurrences of a value to a counted container.
    #[inline]
    pub fn add_count(&mut self, value: Value, count: u32) -> Result<(), ContainerError> {
        self.add(None, None, value, count)
    }
}
