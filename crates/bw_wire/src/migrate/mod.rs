//! Per-type deserializers that reshape stored data into current beans.
//!
//! A [`BeanDeserializer`] sits between the stored properties of a bean and
//! its current [`MetaBean`](crate::bean::MetaBean). It can rename, drop or
//! merge properties while the bean is read, so that data written by an
//! older version of a type still loads.
//!
//! ## Menu
//!
//! - [`BeanDeserializer`]: the hooks of one bean read.
//! - [`IdentityDeserializer`], [`LenientDeserializer`]: stock deserializers.
//! - [`BeanReadSession`], [`read_bean`]: the read protocol.
//! - [`DeserializerRegistry`]: per-type selection with providers and declared defaults.
//! - [`DeclaredDeserializer`], [`Manifest`]: defaults named by manifests.

// -----------------------------------------------------------------------------
// Modules

mod declared;
mod deserializer;
mod error;
mod manifest;
mod read;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use declared::{DeclaredDeserializer, DeclaredSources, DeserializerInstance, ManifestResource};
pub use deserializer::{
    BeanDeserializer, IdentityDeserializer, LenientDeserializer, PropertyLookup, ReadPolicy,
};
pub use error::{ManifestError, MigrateError};
pub use manifest::{Manifest, ManifestEntry};
pub use read::{BeanReadSession, read_bean};
pub use registry::{DeserializerProvider, DeserializerRegistry};
