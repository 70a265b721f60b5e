use alloc::boxed::Box;

use crate::Value;
use crate::container::{ContainerError, WriteContainer};
use crate::container::cursor::declared_slots;
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// Accumulator

/// The kind-specific half of a [`WriteContainer`].
///
/// [`CheckedBuilder`] validates each entry against the category before it
/// reaches `accept`, so implementations only see well-formed entries:
/// a key exactly when the category uses keys, a column exactly when it
/// uses columns, and a count of one unless the category is counted.
pub(crate) trait Accumulator: Send + 'static {
    fn kind(&self) -> &'static ContainerKind;

    fn dimensions(&mut self, _dimensions: &[usize]) -> Result<(), ContainerError> {
        Ok(())
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        column: Option<Value>,
        value: Value,
        count: u32,
    ) -> Result<(), ContainerError>;

    fn finish(self) -> Value;
}

// -----------------------------------------------------------------------------
// CheckedBuilder

/// A [`WriteContainer`] enforcing the per-category entry rules.
pub(crate) struct CheckedBuilder<A: Accumulator> {
    key: TypeDescriptor,
    column: TypeDescriptor,
    value: TypeDescriptor,
    inner: A,
}

impl<A: Accumulator> CheckedBuilder<A> {
    pub(crate) fn new(inner: A, declared: &TypeDescriptor) -> Self {
        let (key, column, value) = declared_slots(inner.kind(), declared);
        Self {
            key,
            column,
            value,
            inner,
        }
    }

    /// Overrides the value type, for kinds without generic arguments.
    #[inline]
    pub(crate) fn with_value_type(mut self, value: TypeDescriptor) -> Self {
        self.value = value;
        self
    }

    #[inline]
    pub(crate) fn boxed(self) -> Box<dyn WriteContainer> {
        Box::new(self)
    }
}

/// Validates the presence of key, column and count for a category.
pub(crate) fn check_entry(
    kind: &'static ContainerKind,
    key: Option<&Value>,
    column: Option<&Value>,
    count: u32,
) -> Result<(), ContainerError> {
    let tag = kind.tag();
    let category = kind.category();

    match (category.uses_key(), key.is_some()) {
        (false, true) => return Err(ContainerError::UnexpectedKey { tag }),
        (true, false) => return Err(ContainerError::MissingKey { tag }),
        _ => {}
    }
    match (category.uses_column(), column.is_some()) {
        (false, true) => return Err(ContainerError::UnexpectedColumn { tag }),
        (true, false) => return Err(ContainerError::MissingColumn { tag }),
        _ => {}
    }
    let valid_count = match category {
        ContainerCategory::Counted => count > 0,
        _ => count == 1,
    };
    if !valid_count {
        return Err(ContainerError::InvalidCount { tag, count });
    }
    Ok(())
}

impl<A: Accumulator> WriteContainer for CheckedBuilder<A> {
    #[inline]
    fn category(&self) -> ContainerCategory {
        self.inner.kind().category()
    }

    #[inline]
    fn kind(&self) -> &'static ContainerKind {
        self.inner.kind()
    }

    #[inline]
    fn key_type(&self) -> TypeDescriptor {
        self.key.clone()
    }

    #[inline]
    fn column_type(&self) -> TypeDescriptor {
        self.column.clone()
    }

    #[inline]
    fn value_type(&self) -> TypeDescriptor {
        self.value.clone()
    }

    #[inline]
    fn dimensions(&mut self, dimensions: &[usize]) -> Result<(), ContainerError> {
        self.inner.dimensions(dimensions)
    }

    fn add(
        &mut self,
        key: Option<Value>,
        column: Option<Value>,
        value: Value,
        count: u32,
    ) -> Result<(), ContainerError> {
        check_entry(self.inner.kind(), key.as_ref(), column.as_ref(), count)?;
        self.inner.accept(key, column, value, count)
    }

    #[inline]
    fn build(self: Box<Self>) -> Value {
        self.inner.finish()
    }
}
