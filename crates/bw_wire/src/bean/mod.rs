//! The property-descriptor capability consumed by the core.
//!
//! The core never discovers bean properties itself. A bean exposes a
//! [`MetaBean`] which lists [`MetaProperty`] descriptors and creates
//! [`BeanBuilder`]s. [`DynamicMetaBean`] is a ready-made implementation
//! driven entirely at runtime.
//!
//! ## Menu
//!
//! - [`Bean`]: a structured value with named properties.
//! - [`MetaBean`]: the description of one bean type.
//! - [`MetaProperty`]: the description of one property.
//! - [`BeanBuilder`]: a single-use builder, consumed by [`BeanBuilder::build`].
//! - [`DynamicMetaBean`], [`DynamicBean`]: runtime beans.
//! - [`BufferingBuilder`]: defers every property set until `build`.

// -----------------------------------------------------------------------------
// Modules

mod buffering;
mod dynamic;
mod error;

// -----------------------------------------------------------------------------
// Exports

pub use buffering::BufferingBuilder;
pub use dynamic::{DynamicBean, DynamicBeanBuilder, DynamicMetaBean, DynamicProperty};
pub use error::BeanError;

// -----------------------------------------------------------------------------
// Traits

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Value;
use crate::info::{Type, TypeDescriptor};

/// A structured value exposing named properties.
pub trait Bean: Any + Send + Sync + fmt::Debug {
    /// Returns the description of this bean's type.
    fn meta_bean(&self) -> Arc<dyn MetaBean>;

    /// Returns the current value of a property.
    ///
    /// `None` if the bean has no such property.
    fn property_value(&self, name: &str) -> Option<Value>;

    fn clone_bean(&self) -> Box<dyn Bean>;

    fn as_any(&self) -> &dyn Any;
}

/// The description of one bean type.
pub trait MetaBean: Send + Sync + fmt::Debug {
    /// Returns the bean type.
    fn bean_type(&self) -> Type;

    /// Returns the properties in declaration order.
    fn properties(&self) -> &[Arc<dyn MetaProperty>];

    /// Finds a property by name.
    fn property(&self, name: &str) -> Option<Arc<dyn MetaProperty>> {
        self.properties()
            .iter()
            .find(|property| property.name() == name)
            .cloned()
    }

    /// Creates a builder for a new bean of this type.
    fn builder(self: Arc<Self>) -> Box<dyn BeanBuilder>;
}

/// The description of one property of a bean.
pub trait MetaProperty: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Returns the declared type, generic arguments included.
    fn declared_type(&self) -> TypeDescriptor;

    /// Reads this property from a bean.
    fn get(&self, bean: &dyn Bean) -> Option<Value> {
        bean.property_value(self.name())
    }
}

/// A builder for a single bean.
///
/// `build` consumes the builder, so it can never be reused.
pub trait BeanBuilder: Send + fmt::Debug {
    /// Returns the description of the bean being built.
    fn meta_bean(&self) -> Arc<dyn MetaBean>;

    /// Returns the value set so far for a property.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Sets a property.
    fn set(&mut self, property: Arc<dyn MetaProperty>, value: Value) -> Result<(), BeanError>;

    /// Builds the bean.
    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError>;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Bean {
    /// Downcasts to a concrete bean.
    #[inline]
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl dyn BeanBuilder {
    /// Downcasts to a concrete builder.
    #[inline]
    pub fn downcast_mut<T: BeanBuilder + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for Box<dyn Bean> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_bean()
    }
}

// -----------------------------------------------------------------------------
// Dynamic comparison

/// Orders two beans by type, then property by property.
pub(crate) fn bean_cmp(a: &dyn Bean, b: &dyn Bean) -> Ordering {
    let meta = a.meta_bean();
    let ordering = meta.bean_type().cmp(&b.meta_bean().bean_type());
    if ordering != Ordering::Equal {
        return ordering;
    }
    for property in meta.properties() {
        let ordering = a
            .property_value(property.name())
            .cmp(&b.property_value(property.name()));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

pub(crate) fn bean_hash(bean: &dyn Bean, mut state: &mut dyn Hasher) {
    let meta = bean.meta_bean();
    meta.bean_type().hash(&mut state);
    for property in meta.properties() {
        bean.property_value(property.name()).hash(&mut state);
    }
}
