use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;

use log::debug;

use crate::Value;
use crate::bean::{Bean, BeanBuilder, MetaBean, MetaProperty};
use crate::info::Type;
use crate::migrate::{BeanDeserializer, MigrateError, PropertyLookup, ReadPolicy};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// BeanReadSession

/// Reads one bean property by property through a [`BeanDeserializer`].
///
/// Format readers that stream properties use the session directly,
/// [`read_bean`] covers the case where all properties are at hand.
pub struct BeanReadSession<'a, D: ?Sized> {
    deserializer: &'a D,
    ty: Type,
    meta: Arc<dyn MetaBean>,
    builder: Box<dyn BeanBuilder>,
    policy: ReadPolicy,
}

impl<'a, D: BeanDeserializer + ?Sized> BeanReadSession<'a, D> {
    /// Finds the bean description and creates the builder.
    pub fn begin(
        deserializer: &'a D,
        registry: &TypeRegistry,
        ty: &Type,
        policy: ReadPolicy,
    ) -> Result<Self, MigrateError> {
        let meta = deserializer.find_meta_bean(ty, registry)?;
        let builder = deserializer.create_builder(ty, &meta);
        Ok(Self {
            deserializer,
            ty: ty.clone(),
            meta,
            builder,
            policy,
        })
    }

    #[inline]
    pub fn bean_type(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn meta_bean(&self) -> &Arc<dyn MetaBean> {
        &self.meta
    }

    #[inline]
    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Maps a stored property name onto the current bean.
    ///
    /// `Ok(None)` means the value must be read and dropped.
    pub fn property(&self, name: &str) -> Result<Option<Arc<dyn MetaProperty>>, MigrateError> {
        match self
            .deserializer
            .find_meta_property(&self.ty, &*self.meta, name)
        {
            PropertyLookup::Found(property) => Ok(Some(property)),
            PropertyLookup::Discard => {
                debug!("discarding property `{name}` of `{}`", self.ty);
                Ok(None)
            }
            PropertyLookup::Unknown => match self.policy {
                ReadPolicy::Strict => Err(MigrateError::UnknownProperty {
                    bean: self.ty.path().to_string(),
                    property: name.to_string(),
                }),
                ReadPolicy::Lenient => {
                    debug!("dropping unknown property `{name}` of `{}`", self.ty);
                    Ok(None)
                }
            },
        }
    }

    /// Sets a value on a property returned by [`property`](Self::property).
    #[inline]
    pub fn set(
        &mut self,
        property: &Arc<dyn MetaProperty>,
        value: Value,
    ) -> Result<(), MigrateError> {
        self.deserializer
            .set_value(&mut *self.builder, property, value)
    }

    /// Maps a stored property and sets its value, or drops it.
    pub fn read_property(&mut self, name: &str, value: Value) -> Result<(), MigrateError> {
        match self.property(name)? {
            Some(property) => self.set(&property, value),
            None => Ok(()),
        }
    }

    /// Builds the bean.
    #[inline]
    pub fn finish(self) -> Result<Box<dyn Bean>, MigrateError> {
        self.deserializer.build(&self.ty, self.builder)
    }
}

/// Reads a bean from its stored properties, in stored order.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::bean::{DynamicMetaBean, DynamicProperty};
/// use bw_wire::info::{Type, Typed};
/// use bw_wire::migrate::{self, IdentityDeserializer, MigrateError, ReadPolicy};
/// use bw_wire::registry::TypeRegistry;
///
/// let ty = Type::bean("app::Point");
/// let mut registry = TypeRegistry::new();
/// registry.register_bean(
///     DynamicMetaBean::new(ty.clone())
///         .with_property(DynamicProperty::new("x", i32::type_descriptor()))
///         .into_arc(),
/// );
///
/// let stored = [("x", Value::from(1_i32)), ("z", Value::from(0_i32))];
///
/// let identity = &IdentityDeserializer;
/// let strict = migrate::read_bean(identity, &registry, &ty, stored.clone(), ReadPolicy::Strict);
/// assert!(matches!(strict, Err(MigrateError::UnknownProperty { .. })));
///
/// let bean = migrate::read_bean(identity, &registry, &ty, stored, ReadPolicy::Lenient).unwrap();
/// assert_eq!(bean.property_value("x"), Some(Value::from(1_i32)));
/// ```
pub fn read_bean<D, I, K>(
    deserializer: &D,
    registry: &TypeRegistry,
    ty: &Type,
    properties: I,
    policy: ReadPolicy,
) -> Result<Box<dyn Bean>, MigrateError>
where
    D: BeanDeserializer + ?Sized,
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut session = BeanReadSession::begin(deserializer, registry, ty, policy)?;
    for (name, value) in properties {
        session.read_property(name.as_ref(), value)?;
    }
    session.finish()
}
