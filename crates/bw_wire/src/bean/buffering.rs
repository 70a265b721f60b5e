use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::Value;
use crate::bean::{Bean, BeanBuilder, BeanError, MetaBean, MetaProperty};

/// A builder that records every property set and applies them all on `build`.
///
/// Migration code uses it to look at the complete incoming data before the
/// real bean exists: rename a property, merge two old properties into one,
/// or drop values that no longer make sense.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::bean::{BeanBuilder, BufferingBuilder, DynamicMetaBean, DynamicProperty, MetaBean};
/// use bw_wire::info::{Type, Typed};
///
/// let meta = DynamicMetaBean::new(Type::bean("my_app::Point"))
///     .with_property(DynamicProperty::new("x", i32::type_descriptor()))
///     .with_property(DynamicProperty::new("y", i32::type_descriptor()))
///     .into_arc();
///
/// let mut builder = BufferingBuilder::new(meta.clone());
/// builder.set(meta.property("x").unwrap(), Value::from(1_i32)).unwrap();
///
/// // Copy `x` into `y` before the bean is built.
/// let x = builder.get("x").cloned().unwrap();
/// builder.insert(meta.property("y").unwrap(), x);
///
/// let point = Box::new(builder).build().unwrap();
/// assert_eq!(point.property_value("y"), Some(Value::from(1_i32)));
/// ```
pub struct BufferingBuilder {
    meta: Arc<dyn MetaBean>,
    entries: Vec<(Arc<dyn MetaProperty>, Value)>,
}

impl BufferingBuilder {
    pub fn new(meta: Arc<dyn MetaBean>) -> Self {
        Self {
            meta,
            entries: Vec::new(),
        }
    }

    /// Returns the buffered entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[(Arc<dyn MetaProperty>, Value)] {
        &self.entries
    }

    /// Inserts or replaces a buffered value.
    pub fn insert(&mut self, property: Arc<dyn MetaProperty>, value: Value) {
        match self
            .entries
            .iter_mut()
            .find(|(p, _)| p.name() == property.name())
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Removes a buffered value by property name.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(p, _)| p.name() == name)?;
        Some(self.entries.remove(index).1)
    }
}

impl BeanBuilder for BufferingBuilder {
    #[inline]
    fn meta_bean(&self) -> Arc<dyn MetaBean> {
        self.meta.clone()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(p, _)| p.name() == name)
            .map(|(_, value)| value)
    }

    #[inline]
    fn set(&mut self, property: Arc<dyn MetaProperty>, value: Value) -> Result<(), BeanError> {
        self.insert(property, value);
        Ok(())
    }

    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        let mut builder = self.meta.builder();
        for (property, value) in self.entries {
            builder.set(property, value)?;
        }
        builder.build()
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for BufferingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(p, v)| (p.name(), v)))
            .finish()
    }
}
