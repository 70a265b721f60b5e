use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::path::PathBuf;

use crate::migrate::BeanDeserializer;

// -----------------------------------------------------------------------------
// DeclaredDeserializer

/// How a declared deserializer is obtained.
#[derive(Clone, Copy)]
pub enum DeserializerInstance {
    /// A shared static instance.
    Singleton(&'static dyn BeanDeserializer),
    /// A constructor called once per [`DeserializerRegistry`](super::DeserializerRegistry).
    Constructor(fn() -> Arc<dyn BeanDeserializer>),
}

/// A deserializer made available under a name.
///
/// Declarations become defaults only once a manifest names them, see
/// [`Manifest`](super::Manifest). With the `auto_register` feature,
/// [`declare_deserializer!`](crate::declare_deserializer) submits one for
/// static collection.
#[derive(Clone, Copy)]
pub struct DeclaredDeserializer {
    name: &'static str,
    target: &'static str,
    instance: DeserializerInstance,
}

impl DeclaredDeserializer {
    /// Declares a static instance for the bean type at path `target`.
    pub const fn singleton(
        name: &'static str,
        target: &'static str,
        instance: &'static dyn BeanDeserializer,
    ) -> Self {
        Self {
            name,
            target,
            instance: DeserializerInstance::Singleton(instance),
        }
    }

    /// Declares a constructor for the bean type at path `target`.
    pub const fn constructor(
        name: &'static str,
        target: &'static str,
        ctor: fn() -> Arc<dyn BeanDeserializer>,
    ) -> Self {
        Self {
            name,
            target,
            instance: DeserializerInstance::Constructor(ctor),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the path of the bean type this deserializer is written for.
    #[inline]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// Returns the instance, calling the constructor if needed.
    pub fn instance(&self) -> Arc<dyn BeanDeserializer> {
        match self.instance {
            DeserializerInstance::Singleton(instance) => Arc::new(instance),
            DeserializerInstance::Constructor(ctor) => ctor(),
        }
    }
}

impl fmt::Debug for DeclaredDeserializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = match self.instance {
            DeserializerInstance::Singleton(_) => "singleton",
            DeserializerInstance::Constructor(_) => "constructor",
        };
        f.debug_struct("DeclaredDeserializer")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("instance", &instance)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ManifestResource

/// The text of one manifest, with a name used in diagnostics.
#[derive(Debug, Clone)]
pub struct ManifestResource {
    name: Cow<'static, str>,
    contents: Cow<'static, str>,
}

impl ManifestResource {
    pub const fn new(name: &'static str, contents: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            contents: Cow::Borrowed(contents),
        }
    }

    pub fn owned(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            contents: Cow::Owned(contents.into()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

crate::cfg::auto_register! {
    inventory::collect!(DeclaredDeserializer);
    inventory::collect!(ManifestResource);
}

/// Submits a [`DeclaredDeserializer`] for static collection.
///
/// ```ignore
/// static PERSON_V2: PersonV2 = PersonV2;
///
/// bw_wire::declare_deserializer!(
///     DeclaredDeserializer::singleton("app::PersonV2", "app::Person", &PERSON_V2)
/// );
/// ```
#[macro_export]
macro_rules! declare_deserializer {
    ($declaration:expr) => {
        $crate::__macro_exports::inventory::submit! { $declaration }
    };
}

/// Submits a [`ManifestResource`] for static collection.
///
/// ```ignore
/// bw_wire::declare_manifest!("app", include_str!("deserializers.manifest"));
/// ```
#[macro_export]
macro_rules! declare_manifest {
    ($name:expr, $contents:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::migrate::ManifestResource::new($name, $contents)
        }
    };
}

// -----------------------------------------------------------------------------
// DeclaredSources

/// The declarations and manifests a
/// [`DeserializerRegistry`](super::DeserializerRegistry) loads its defaults from.
///
/// Manifests are merged in order: embedded resources first, then files.
#[derive(Debug, Clone, Default)]
pub struct DeclaredSources {
    pub declarations: Vec<DeclaredDeserializer>,
    pub manifests: Vec<ManifestResource>,
    pub paths: Vec<PathBuf>,
}

impl DeclaredSources {
    /// Sources with nothing declared.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Everything submitted through [`declare_deserializer!`](crate::declare_deserializer)
    /// and [`declare_manifest!`](crate::declare_manifest).
    ///
    /// Empty without the `auto_register` feature.
    pub fn collected() -> Self {
        crate::cfg::auto_register! {
            if {
                let declarations = inventory::iter::<DeclaredDeserializer>.into_iter();
                let manifests = inventory::iter::<ManifestResource>.into_iter();
                Self {
                    declarations: declarations.copied().collect(),
                    manifests: manifests.cloned().collect(),
                    paths: Vec::new(),
                }
            } else {
                Self::empty()
            }
        }
    }

    pub fn with_declaration(mut self, declaration: DeclaredDeserializer) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_manifest(mut self, manifest: ManifestResource) -> Self {
        self.manifests.push(manifest);
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Finds a declaration by name, the last one wins.
    pub fn declaration(&self, name: &str) -> Option<&DeclaredDeserializer> {
        self.declarations.iter().rev().find(|d| d.name == name)
    }
}
