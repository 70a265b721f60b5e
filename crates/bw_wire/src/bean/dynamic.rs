use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::Value;
use crate::bean::{Bean, BeanBuilder, BeanError, MetaBean, MetaProperty};
use crate::info::{Type, TypeDescriptor};

// -----------------------------------------------------------------------------
// DynamicProperty

/// A property described at runtime.
#[derive(Debug, Clone)]
pub struct DynamicProperty {
    name: Cow<'static, str>,
    declared: TypeDescriptor,
    required: bool,
}

impl DynamicProperty {
    pub fn new(name: impl Into<Cow<'static, str>>, declared: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            declared,
            required: false,
        }
    }

    /// Marks the property as required, `build` fails while it is unset.
    #[inline]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl MetaProperty for DynamicProperty {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn declared_type(&self) -> TypeDescriptor {
        self.declared.clone()
    }
}

// -----------------------------------------------------------------------------
// DynamicMetaBean

/// A bean type described at runtime.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::bean::{DynamicMetaBean, DynamicProperty, MetaBean};
/// use bw_wire::info::{Type, Typed};
///
/// let meta = DynamicMetaBean::new(Type::bean("my_app::Person"))
///     .with_property(DynamicProperty::new("name", String::type_descriptor()))
///     .with_property(DynamicProperty::new("age", u32::type_descriptor()))
///     .into_arc();
///
/// let mut builder = meta.clone().builder();
/// builder.set(meta.property("name").unwrap(), Value::from("Ada")).unwrap();
/// let person = builder.build().unwrap();
///
/// assert_eq!(person.property_value("name"), Some(Value::from("Ada")));
/// assert_eq!(person.property_value("age"), Some(Value::Null));
/// assert_eq!(person.property_value("height"), None);
/// ```
pub struct DynamicMetaBean {
    ty: Type,
    properties: Vec<Arc<dyn MetaProperty>>,
    required: Vec<String>,
}

impl DynamicMetaBean {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            properties: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn with_property(mut self, property: DynamicProperty) -> Self {
        if property.is_required() {
            self.required.push(property.name().to_string());
        }
        self.properties.push(Arc::new(property));
        self
    }

    /// Appends a property with a custom descriptor implementation.
    pub fn with_meta_property(mut self, property: Arc<dyn MetaProperty>) -> Self {
        self.properties.push(property);
        self
    }

    #[inline]
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl MetaBean for DynamicMetaBean {
    #[inline]
    fn bean_type(&self) -> Type {
        self.ty.clone()
    }

    #[inline]
    fn properties(&self) -> &[Arc<dyn MetaProperty>] {
        &self.properties
    }

    fn builder(self: Arc<Self>) -> Box<dyn BeanBuilder> {
        Box::new(DynamicBeanBuilder {
            meta: self,
            values: BTreeMap::new(),
        })
    }
}

impl fmt::Debug for DynamicMetaBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicMetaBean")
            .field("type", &self.ty.path())
            .field(
                "properties",
                &self.properties.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// -----------------------------------------------------------------------------
// DynamicBean

/// A bean whose properties are held in a map.
#[derive(Clone)]
pub struct DynamicBean {
    meta: Arc<DynamicMetaBean>,
    values: BTreeMap<String, Value>,
}

impl DynamicBean {
    #[inline]
    pub fn dynamic_meta_bean(&self) -> &Arc<DynamicMetaBean> {
        &self.meta
    }
}

impl Bean for DynamicBean {
    #[inline]
    fn meta_bean(&self) -> Arc<dyn MetaBean> {
        self.meta.clone()
    }

    fn property_value(&self, name: &str) -> Option<Value> {
        self.meta.property(name)?;
        Some(self.values.get(name).cloned().unwrap_or_default())
    }

    #[inline]
    fn clone_bean(&self) -> Box<dyn Bean> {
        Box::new(self.clone())
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for DynamicBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.meta.ty.name());
        for property in &self.meta.properties {
            if let Some(value) = self.values.get(property.name()) {
                s.field(property.name(), value);
            }
        }
        s.finish()
    }
}

// -----------------------------------------------------------------------------
// DynamicBeanBuilder

/// The builder of [`DynamicBean`].
pub struct DynamicBeanBuilder {
    meta: Arc<DynamicMetaBean>,
    values: BTreeMap<String, Value>,
}

impl BeanBuilder for DynamicBeanBuilder {
    #[inline]
    fn meta_bean(&self) -> Arc<dyn MetaBean> {
        self.meta.clone()
    }

    #[inline]
    fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn set(&mut self, property: Arc<dyn MetaProperty>, value: Value) -> Result<(), BeanError> {
        let name = property.name();
        if self.meta.property(name).is_none() {
            return Err(BeanError::UnknownProperty {
                bean: self.meta.ty.clone(),
                property: name.to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        for name in &self.meta.required {
            if self.values.get(name).is_none_or(Value::is_null) {
                return Err(BeanError::MissingProperty {
                    bean: self.meta.ty.clone(),
                    property: name.clone(),
                });
            }
        }
        Ok(Box::new(DynamicBean {
            meta: self.meta,
            values: self.values,
        }))
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for DynamicBeanBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBeanBuilder")
            .field("type", &self.meta.ty.path())
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;

    use super::{DynamicMetaBean, DynamicProperty};
    use crate::Value;
    use crate::bean::{BeanError, MetaBean};
    use crate::info::{Type, Typed};

    fn person() -> Arc<DynamicMetaBean> {
        DynamicMetaBean::new(Type::bean("test::Person"))
            .with_property(DynamicProperty::new("name", String::type_descriptor()).required())
            .with_property(DynamicProperty::new("age", u32::type_descriptor()))
            .into_arc()
    }

    #[test]
    fn build_and_compare() {
        let meta = person();
        let name = meta.property("name").unwrap();

        let mut a = meta.clone().builder();
        a.set(name.clone(), Value::from("Ada")).unwrap();
        let a = Value::Bean(a.build().unwrap());

        let mut b = meta.clone().builder();
        b.set(name, Value::from("Ada")).unwrap();
        let b = Value::Bean(b.build().unwrap());

        assert_eq!(a, b);
        assert_eq!(a.value_type(), Type::bean("test::Person"));
    }

    #[test]
    fn required_property() {
        let meta = person();
        let err = meta.clone().builder().build().unwrap_err();
        assert!(matches!(err, BeanError::MissingProperty { .. }));
    }

    #[test]
    fn foreign_property_rejected() {
        let meta = person();
        let other = DynamicMetaBean::new(Type::bean("test::Other"))
            .with_property(DynamicProperty::new("height", f64::type_descriptor()))
            .into_arc();
        let mut builder = meta.builder();
        let err = builder
            .set(other.property("height").unwrap(), Value::from(1.8_f64))
            .unwrap_err();
        assert!(matches!(err, BeanError::UnknownProperty { .. }));
    }
}
