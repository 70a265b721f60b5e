use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::Value;
use crate::bean::{Bean, BeanBuilder, MetaBean, MetaProperty};
use crate::info::Type;
use crate::migrate::MigrateError;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// PropertyLookup

/// How a stored property name maps onto the current bean.
#[derive(Debug, Clone)]
pub enum PropertyLookup {
    /// The value is set on this property.
    Found(Arc<dyn MetaProperty>),
    /// The value is read and dropped on purpose.
    Discard,
    /// Nothing matches, the [`ReadPolicy`] decides.
    Unknown,
}

/// What to do with stored properties the current bean does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReadPolicy {
    /// Fail with [`MigrateError::UnknownProperty`].
    #[default]
    Strict,
    /// Drop the value.
    Lenient,
}

// -----------------------------------------------------------------------------
// BeanDeserializer

/// Hooks run while one bean is read, in this order:
///
/// 1. [`find_meta_bean`](Self::find_meta_bean) once;
/// 2. [`create_builder`](Self::create_builder) once;
/// 3. [`find_meta_property`](Self::find_meta_property) and
///    [`set_value`](Self::set_value) per stored property;
/// 4. [`build`](Self::build) once.
///
/// Every hook has a pass-through default, a migration overrides only the
/// steps it needs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bw_wire::bean::MetaBean;
/// use bw_wire::info::Type;
/// use bw_wire::migrate::{BeanDeserializer, PropertyLookup};
///
/// /// `surname` was renamed to `last_name`, `nickname` was removed.
/// struct PersonV2;
///
/// impl BeanDeserializer for PersonV2 {
///     fn find_meta_property(&self, _: &Type, meta: &dyn MetaBean, name: &str) -> PropertyLookup {
///         let found = |name: &str| {
///             meta.property(name).map_or(PropertyLookup::Unknown, PropertyLookup::Found)
///         };
///         match name {
///             "surname" => found("last_name"),
///             "nickname" => PropertyLookup::Discard,
///             _ => found(name),
///         }
///     }
/// }
/// ```
pub trait BeanDeserializer: Send + Sync {
    /// Finds the description of the bean being read.
    fn find_meta_bean(
        &self,
        ty: &Type,
        registry: &TypeRegistry,
    ) -> Result<Arc<dyn MetaBean>, MigrateError> {
        registry
            .meta_bean(ty)
            .ok_or_else(|| MigrateError::MetaBeanNotFound {
                ty: ty.path().into(),
            })
    }

    /// Creates the builder receiving the stored properties.
    fn create_builder(&self, _ty: &Type, meta: &Arc<dyn MetaBean>) -> Box<dyn BeanBuilder> {
        meta.clone().builder()
    }

    /// Maps a stored property name onto the current bean.
    fn find_meta_property(&self, _ty: &Type, meta: &dyn MetaBean, name: &str) -> PropertyLookup {
        meta.property(name)
            .map_or(PropertyLookup::Unknown, PropertyLookup::Found)
    }

    /// Sets one value on the builder.
    fn set_value(
        &self,
        builder: &mut dyn BeanBuilder,
        property: &Arc<dyn MetaProperty>,
        value: Value,
    ) -> Result<(), MigrateError> {
        builder.set(property.clone(), value)?;
        Ok(())
    }

    /// Builds the bean.
    fn build(
        &self,
        _ty: &Type,
        builder: Box<dyn BeanBuilder>,
    ) -> Result<Box<dyn Bean>, MigrateError> {
        Ok(builder.build()?)
    }
}

macro_rules! forward_deserializer {
    ($($ptr:ty),*) => {$(
        impl<D: BeanDeserializer + ?Sized> BeanDeserializer for $ptr {
            #[inline]
            fn find_meta_bean(
                &self,
                ty: &Type,
                registry: &TypeRegistry,
            ) -> Result<Arc<dyn MetaBean>, MigrateError> {
                (**self).find_meta_bean(ty, registry)
            }

            #[inline]
            fn create_builder(&self, ty: &Type, meta: &Arc<dyn MetaBean>) -> Box<dyn BeanBuilder> {
                (**self).create_builder(ty, meta)
            }

            #[inline]
            fn find_meta_property(
                &self,
                ty: &Type,
                meta: &dyn MetaBean,
                name: &str,
            ) -> PropertyLookup {
                (**self).find_meta_property(ty, meta, name)
            }

            #[inline]
            fn set_value(
                &self,
                builder: &mut dyn BeanBuilder,
                property: &Arc<dyn MetaProperty>,
                value: Value,
            ) -> Result<(), MigrateError> {
                (**self).set_value(builder, property, value)
            }

            #[inline]
            fn build(
                &self,
                ty: &Type,
                builder: Box<dyn BeanBuilder>,
            ) -> Result<Box<dyn Bean>, MigrateError> {
                (**self).build(ty, builder)
            }
        }
    )*};
}

forward_deserializer!(&'static D, Arc<D>);

// -----------------------------------------------------------------------------
// Stock deserializers

/// Reads stored data as is, through the registered [`MetaBean`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDeserializer;

impl BeanDeserializer for IdentityDeserializer {}

/// Wraps a deserializer so that unknown properties are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientDeserializer<D>(pub D);

impl<D: BeanDeserializer> BeanDeserializer for LenientDeserializer<D> {
    #[inline]
    fn find_meta_bean(
        &self,
        ty: &Type,
        registry: &TypeRegistry,
    ) -> Result<Arc<dyn MetaBean>, MigrateError> {
        self.0.find_meta_bean(ty, registry)
    }

    #[inline]
    fn create_builder(&self, ty: &Type, meta: &Arc<dyn MetaBean>) -> Box<dyn BeanBuilder> {
        self.0.create_builder(ty, meta)
    }

    fn find_meta_property(&self, ty: &Type, meta: &dyn MetaBean, name: &str) -> PropertyLookup {
        match self.0.find_meta_property(ty, meta, name) {
            PropertyLookup::Unknown => PropertyLookup::Discard,
            lookup => lookup,
        }
    }

    #[inline]
    fn set_value(
        &self,
        builder: &mut dyn BeanBuilder,
        property: &Arc<dyn MetaProperty>,
        value: Value,
    ) -> Result<(), MigrateError> {
        self.0.set_value(builder, property, value)
    }

    #[inline]
    fn build(
        &self,
        ty: &Type,
        builder: Box<dyn BeanBuilder>,
    ) -> Result<Box<dyn Bean>, MigrateError> {
        self.0.build(ty, builder)
    }
}
