use alloc::borrow::Cow;
use core::iter::Peekable;

use crate::Value;
use crate::container::ReadContainer;
use crate::info::{ContainerCategory, ContainerKind, Type, TypeDescriptor, Typed};

// -----------------------------------------------------------------------------
// meta_type_required

/// Returns `true` if a container of kind `runtime` stored under `declared`
/// needs its wire tag.
///
/// The tag can be omitted when the declared raw type is the runtime kind,
/// or an abstract kind whose default is the runtime kind. Untyped
/// declarations always need the tag.
///
/// # Examples
///
/// ```
/// use bw_wire::container::{base, meta_type_required};
/// use bw_wire::info::TypeDescriptor;
///
/// assert!(!meta_type_required(&base::LIST.ty(), &base::LIST));
/// assert!(meta_type_required(&base::SET.ty(), &base::LIST));
/// assert!(meta_type_required(TypeDescriptor::any().raw(), &base::LIST));
/// ```
pub fn meta_type_required(declared: &Type, runtime: &'static ContainerKind) -> bool {
    match declared.container_kind() {
        Some(kind) => kind.default_kind() != runtime,
        None => true,
    }
}

// -----------------------------------------------------------------------------
// Shape

/// Everything a cursor reports besides its entries.
#[derive(Debug, Clone)]
pub(crate) struct Shape {
    kind: &'static ContainerKind,
    key: TypeDescriptor,
    column: TypeDescriptor,
    value: TypeDescriptor,
    meta_type: Option<TypeDescriptor>,
    meta_type_required: bool,
    size: Option<usize>,
    dimensions: [Option<usize>; 2],
}

impl Shape {
    /// Maps the declared arguments onto key, column and value slots.
    ///
    /// The arguments are only used if exactly the kind's arity is present.
    pub(crate) fn new(kind: &'static ContainerKind, declared: &TypeDescriptor) -> Self {
        let (key, column, value) = declared_slots(kind, declared);
        Self {
            kind,
            key,
            column,
            value,
            meta_type: None,
            meta_type_required: meta_type_required(declared.raw(), kind),
            size: None,
            dimensions: [None, None],
        }
    }

    #[inline]
    pub(crate) fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    #[inline]
    pub(crate) fn with_dimensions(mut self, first: usize, second: usize) -> Self {
        self.dimensions = [Some(first), Some(second)];
        self
    }

    #[inline]
    pub(crate) fn with_value_type(mut self, value: TypeDescriptor) -> Self {
        self.value = value;
        self
    }

    /// Replaces the argument-less runtime type reported as meta type.
    #[inline]
    pub(crate) fn with_meta_type(mut self, meta_type: TypeDescriptor) -> Self {
        self.meta_type = Some(meta_type);
        self
    }

    #[inline]
    pub(crate) fn with_meta_type_required(mut self, required: bool) -> Self {
        self.meta_type_required = required;
        self
    }

    #[inline]
    pub(crate) fn kind(&self) -> &'static ContainerKind {
        self.kind
    }

    #[inline]
    pub(crate) fn key_type(&self) -> TypeDescriptor {
        self.key.clone()
    }

    #[inline]
    pub(crate) fn column_type(&self) -> TypeDescriptor {
        self.column.clone()
    }

    #[inline]
    pub(crate) fn value_type(&self) -> TypeDescriptor {
        self.value.clone()
    }

    #[inline]
    pub(crate) fn value_type_ref(&self) -> &TypeDescriptor {
        &self.value
    }
}

/// Splits declared arguments into `(key, column, value)` by category.
pub(crate) fn declared_slots(
    kind: &'static ContainerKind,
    declared: &TypeDescriptor,
) -> (TypeDescriptor, TypeDescriptor, TypeDescriptor) {
    let any = TypeDescriptor::any;
    let args = declared.args_for_arity(kind.arity());
    let mut args = args.into_iter();
    let mut next = || args.next().unwrap_or_else(any);
    match kind.category() {
        ContainerCategory::List | ContainerCategory::Set | ContainerCategory::Counted => {
            (any(), any(), next())
        }
        ContainerCategory::Map => {
            let key = next();
            (key, any(), next())
        }
        ContainerCategory::Table => {
            let row = next();
            let column = next();
            (row, column, next())
        }
        ContainerCategory::Grid => {
            let index = i32::type_descriptor();
            (index.clone(), index, next())
        }
    }
}

// -----------------------------------------------------------------------------
// Entry

/// One entry produced by a container iterator.
///
/// Borrowed for containers holding [`Value`]s, owned for boxed primitives
/// and computed grid indices.
#[derive(Debug, Clone)]
pub(crate) struct Entry<'a> {
    pub key: Option<Cow<'a, Value>>,
    pub column: Option<Cow<'a, Value>>,
    pub value: Cow<'a, Value>,
    pub count: u32,
}

impl<'a> Entry<'a> {
    #[inline]
    pub(crate) fn value(value: &'a Value) -> Self {
        Self {
            key: None,
            column: None,
            value: Cow::Borrowed(value),
            count: 1,
        }
    }

    #[inline]
    pub(crate) fn owned(value: Value) -> Self {
        Self {
            key: None,
            column: None,
            value: Cow::Owned(value),
            count: 1,
        }
    }

    #[inline]
    pub(crate) fn counted(value: &'a Value, count: u32) -> Self {
        Self {
            count,
            ..Self::value(value)
        }
    }

    #[inline]
    pub(crate) fn keyed(key: &'a Value, value: &'a Value) -> Self {
        Self {
            key: Some(Cow::Borrowed(key)),
            ..Self::value(value)
        }
    }

    #[inline]
    pub(crate) fn cell(row: Cow<'a, Value>, column: Cow<'a, Value>, value: &'a Value) -> Self {
        Self {
            key: Some(row),
            column: Some(column),
            ..Self::value(value)
        }
    }
}

/// Random access into grid cells.
pub(crate) trait CellAccess {
    fn cell(&self, row: usize, column: usize) -> Option<&Value>;
}

// -----------------------------------------------------------------------------
// EntryReader

/// A [`ReadContainer`] over any iterator of entries.
pub(crate) struct EntryReader<'a, I: Iterator<Item = Entry<'a>>> {
    shape: Shape,
    entries: Peekable<I>,
    current: Option<Entry<'a>>,
    cells: Option<&'a dyn CellAccess>,
}

impl<'a, I: Iterator<Item = Entry<'a>>> EntryReader<'a, I> {
    pub(crate) fn new(shape: Shape, entries: I) -> Self {
        Self {
            shape,
            entries: entries.peekable(),
            current: None,
            cells: None,
        }
    }

    #[inline]
    pub(crate) fn with_cells(mut self, cells: &'a dyn CellAccess) -> Self {
        self.cells = Some(cells);
        self
    }
}

impl<'a, I: Iterator<Item = Entry<'a>>> ReadContainer for EntryReader<'a, I> {
    #[inline]
    fn category(&self) -> ContainerCategory {
        self.shape.kind.category()
    }

    #[inline]
    fn kind(&self) -> &'static ContainerKind {
        self.shape.kind
    }

    fn meta_type(&self) -> TypeDescriptor {
        match &self.shape.meta_type {
            Some(meta_type) => meta_type.clone(),
            None => TypeDescriptor::of(self.shape.kind.ty()),
        }
    }

    #[inline]
    fn meta_type_required(&self) -> bool {
        self.shape.meta_type_required
    }

    #[inline]
    fn size(&self) -> Option<usize> {
        self.shape.size
    }

    #[inline]
    fn dimension_size(&self, dimension: usize) -> Option<usize> {
        self.shape.dimensions.get(dimension).copied().flatten()
    }

    #[inline]
    fn key_type(&self) -> TypeDescriptor {
        self.shape.key_type()
    }

    #[inline]
    fn column_type(&self) -> TypeDescriptor {
        self.shape.column_type()
    }

    #[inline]
    fn value_type(&self) -> TypeDescriptor {
        self.shape.value_type()
    }

    #[inline]
    fn has_next(&mut self) -> bool {
        self.entries.peek().is_some()
    }

    #[inline]
    fn advance(&mut self) {
        self.current = self.entries.next();
    }

    #[inline]
    fn key(&self) -> Option<&Value> {
        self.current.as_ref()?.key.as_deref()
    }

    #[inline]
    fn column(&self) -> Option<&Value> {
        self.current.as_ref()?.column.as_deref()
    }

    #[inline]
    fn value(&self) -> Option<&Value> {
        self.current.as_ref().map(|entry| &*entry.value)
    }

    #[inline]
    fn count(&self) -> u32 {
        self.current.as_ref().map_or(1, |entry| entry.count)
    }

    #[inline]
    fn value_at(&self, row: usize, column: usize) -> Option<&Value> {
        self.cells?.cell(row, column)
    }
}
