use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::fs;
use std::sync::{PoisonError, RwLock};

use bw_utils::hash::HashMap;
use log::{debug, warn};

use crate::Value;
use crate::bean::Bean;
use crate::info::Type;
use crate::migrate::{
    BeanDeserializer, DeclaredSources, IdentityDeserializer, Manifest, ManifestError,
    MigrateError, ReadPolicy,
};
use crate::registry::{TypeRegistry, TypeRegistryArc};

// -----------------------------------------------------------------------------
// DeserializerProvider

/// A source of deserializers for whole families of types.
///
/// Closures taking a `&Type` and returning an optional deserializer are
/// providers.
pub trait DeserializerProvider: Send + Sync {
    /// Returns the deserializer for a type, `None` to pass.
    fn find(&self, ty: &Type) -> Option<Arc<dyn BeanDeserializer>>;
}

impl<F> DeserializerProvider for F
where
    F: Fn(&Type) -> Option<Arc<dyn BeanDeserializer>> + Send + Sync,
{
    #[inline]
    fn find(&self, ty: &Type) -> Option<Arc<dyn BeanDeserializer>> {
        self(ty)
    }
}

// -----------------------------------------------------------------------------
// DeserializerRegistry

#[derive(Default)]
struct Entries {
    explicit: HashMap<String, Arc<dyn BeanDeserializer>>,
    providers: Vec<Arc<dyn DeserializerProvider>>,
}

/// Selects the [`BeanDeserializer`] of each bean type.
///
/// The lookup order is:
///
/// 1. deserializers added with [`register`](Self::register);
/// 2. providers, in the order they were added, the first answer wins;
/// 3. declared defaults named by a manifest;
/// 4. [`IdentityDeserializer`].
///
/// Declared defaults and `[types]` renames are loaded once, when the
/// registry is created.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::bean::{DynamicMetaBean, DynamicProperty};
/// use bw_wire::info::{Type, Typed};
/// use bw_wire::migrate::{
///     DeserializerRegistry, IdentityDeserializer, LenientDeserializer, ReadPolicy,
/// };
/// use bw_wire::registry::TypeRegistryArc;
///
/// let ty = Type::bean("app::Point");
/// let types = TypeRegistryArc::default();
/// types.write().register_bean(
///     DynamicMetaBean::new(ty.clone())
///         .with_property(DynamicProperty::new("x", i32::type_descriptor()))
///         .into_arc(),
/// );
///
/// let registry = DeserializerRegistry::new(types);
/// registry.register(&ty, LenientDeserializer(IdentityDeserializer));
///
/// let stored = [("x", Value::from(1_i32)), ("legacy", Value::Null)];
/// let bean = registry.read_bean(&ty, stored, ReadPolicy::Strict).unwrap();
/// assert_eq!(bean.property_value("x"), Some(Value::from(1_i32)));
/// ```
pub struct DeserializerRegistry {
    types: TypeRegistryArc,
    entries: RwLock<Entries>,
    declared: HashMap<String, Arc<dyn BeanDeserializer>>,
    identity: Arc<dyn BeanDeserializer>,
    manifest_errors: Vec<ManifestError>,
}

impl DeserializerRegistry {
    /// Creates a registry with the defaults collected by
    /// [`DeclaredSources::collected`].
    #[inline]
    pub fn new(types: TypeRegistryArc) -> Self {
        Self::with_sources(types, DeclaredSources::collected())
    }

    /// Creates a registry with explicit declarations and manifests.
    pub fn with_sources(types: TypeRegistryArc, sources: DeclaredSources) -> Self {
        let mut manifest = Manifest::new();
        for resource in &sources.manifests {
            manifest.merge(resource.name(), resource.contents());
        }
        for path in &sources.paths {
            let name = path.display().to_string();
            match fs::read_to_string(path) {
                Ok(contents) => manifest.merge(&name, &contents),
                Err(source) => manifest.error(ManifestError::Io { path: name, source }),
            }
        }

        let Manifest {
            deserializers,
            renames,
            mut errors,
        } = manifest;

        {
            let mut registry = types.write();
            let table = registry.renames_mut();
            for (old, new) in renames {
                table.insert(old, new);
            }
        }

        let mut declared: HashMap<String, Arc<dyn BeanDeserializer>> = HashMap::default();
        {
            let registry = types.read();
            for entry in deserializers {
                let Some(declaration) = sources.declaration(&entry.name) else {
                    let error = ManifestError::UnknownDeserializer {
                        manifest: entry.manifest,
                        line: entry.line,
                        name: entry.name,
                    };
                    warn!("skipping manifest entry: {error}");
                    errors.push(error);
                    continue;
                };
                let target = entry.target.as_deref().unwrap_or(declaration.target());
                let target = canonical_path(&registry, target);
                debug!("declared deserializer `{}` reads `{target}`", entry.name);
                declared.insert(target, declaration.instance());
            }
        }

        Self {
            types,
            entries: RwLock::default(),
            declared,
            identity: Arc::new(IdentityDeserializer),
            manifest_errors: errors,
        }
    }

    /// Returns the type registry beans are read against.
    #[inline]
    pub fn types(&self) -> &TypeRegistryArc {
        &self.types
    }

    /// Returns the problems found while loading manifests.
    #[inline]
    pub fn manifest_errors(&self) -> &[ManifestError] {
        &self.manifest_errors
    }

    /// Sets the deserializer of a type, replacing any previous one.
    pub fn register<D: BeanDeserializer + 'static>(&self, ty: &Type, deserializer: D) {
        self.register_arc(ty, Arc::new(deserializer));
    }

    /// Sets a shared deserializer for a type, replacing any previous one.
    pub fn register_arc(&self, ty: &Type, deserializer: Arc<dyn BeanDeserializer>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries
            .explicit
            .insert(ty.path().to_string(), deserializer)
            .is_some()
        {
            debug!("replaced the deserializer of `{ty}`");
        }
    }

    /// Appends a provider, consulted after every earlier one.
    pub fn add_provider<P: DeserializerProvider + 'static>(&self, provider: P) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .providers
            .push(Arc::new(provider));
    }

    /// Returns the deserializer selected for a type.
    pub fn get(&self, ty: &Type) -> Arc<dyn BeanDeserializer> {
        let providers = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(deserializer) = entries.explicit.get(ty.path()) {
                return deserializer.clone();
            }
            entries.providers.clone()
        };

        providers
            .iter()
            .find_map(|provider| provider.find(ty))
            .or_else(|| self.declared.get(ty.path()).cloned())
            .unwrap_or_else(|| self.identity.clone())
    }

    /// Reads a bean of type `ty` from its stored properties.
    pub fn read_bean<I, K>(
        &self,
        ty: &Type,
        properties: I,
        policy: ReadPolicy,
    ) -> Result<Box<dyn Bean>, MigrateError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let deserializer = self.get(ty);
        let types = self.types.read();
        super::read_bean(&*deserializer, &types, ty, properties, policy)
    }
}

fn canonical_path(registry: &TypeRegistry, path: &str) -> String {
    match registry.resolve(path) {
        Some(resolved) => resolved.ty.path().to_string(),
        None => path.strip_prefix("::").unwrap_or(path).to_string(),
    }
}

impl fmt::Debug for DeserializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut explicit: Vec<_> = entries.explicit.keys().collect();
        explicit.sort();
        let mut declared: Vec<_> = self.declared.keys().collect();
        declared.sort();
        f.debug_struct("DeserializerRegistry")
            .field("explicit", &explicit)
            .field("providers", &entries.providers.len())
            .field("declared", &declared)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::DeserializerRegistry;
    use crate::Value;
    use crate::bean::{
        BeanBuilder, BufferingBuilder, DynamicMetaBean, DynamicProperty, MetaBean, MetaProperty,
    };
    use crate::info::{Type, Typed};
    use crate::migrate::{
        BeanDeserializer, DeclaredDeserializer, DeclaredSources, ManifestError, ManifestResource,
        MigrateError, PropertyLookup, ReadPolicy,
    };
    use crate::registry::TypeRegistryArc;

    /// Stores its own number instead of every value it is given.
    struct Marker(i32);

    impl BeanDeserializer for Marker {
        fn set_value(
            &self,
            builder: &mut dyn BeanBuilder,
            property: &Arc<dyn MetaProperty>,
            _: Value,
        ) -> Result<(), MigrateError> {
            builder.set(property.clone(), Value::from(self.0))?;
            Ok(())
        }
    }

    static DECLARED: Marker = Marker(3);

    fn point() -> Type {
        Type::bean("test::Point")
    }

    fn types() -> TypeRegistryArc {
        let types = TypeRegistryArc::default();
        types.write().register_bean(
            DynamicMetaBean::new(point())
                .with_property(DynamicProperty::new("x", i32::type_descriptor()))
                .into_arc(),
        );
        types
    }

    fn marker_of(registry: &DeserializerRegistry) -> Option<Value> {
        registry
            .read_bean(&point(), [("x", Value::from(0_i32))], ReadPolicy::Strict)
            .unwrap()
            .property_value("x")
    }

    fn declared_sources() -> DeclaredSources {
        DeclaredSources::empty()
            .with_declaration(DeclaredDeserializer::singleton(
                "test::PointV2",
                "test::Point",
                &DECLARED,
            ))
            .with_manifest(ManifestResource::new("test", "[deserializers]\ntest::PointV2"))
    }

    #[test]
    fn lookup_priority() {
        let registry = DeserializerRegistry::with_sources(types(), declared_sources());
        assert_eq!(marker_of(&registry), Some(Value::from(3_i32)));

        registry.add_provider(|ty: &Type| -> Option<Arc<dyn BeanDeserializer>> {
            (ty.path() == "test::Point").then(|| Arc::new(Marker(2)) as _)
        });
        registry.add_provider(|_: &Type| -> Option<Arc<dyn BeanDeserializer>> {
            Some(Arc::new(Marker(9)))
        });
        assert_eq!(marker_of(&registry), Some(Value::from(2_i32)));

        registry.register(&point(), Marker(1));
        assert_eq!(marker_of(&registry), Some(Value::from(1_i32)));
    }

    #[test]
    fn identity_by_default() {
        let registry = DeserializerRegistry::with_sources(types(), DeclaredSources::empty());
        assert_eq!(marker_of(&registry), Some(Value::from(0_i32)));
    }

    #[test]
    fn register_overwrites() {
        let registry = DeserializerRegistry::with_sources(types(), DeclaredSources::empty());
        registry.register(&point(), Marker(1));
        registry.register(&point(), Marker(5));
        assert_eq!(marker_of(&registry), Some(Value::from(5_i32)));
    }

    #[test]
    fn constructor_declaration_with_manifest_target() {
        let sources = DeclaredSources::empty()
            .with_declaration(DeclaredDeserializer::constructor(
                "test::Generic",
                "test::Unused",
                || -> Arc<dyn BeanDeserializer> { Arc::new(Marker(4)) },
            ))
            .with_manifest(ManifestResource::owned(
                "test",
                "[deserializers]\ntest::Point = test::Generic\ntest::Missing",
            ));
        let registry = DeserializerRegistry::with_sources(types(), sources);

        assert_eq!(marker_of(&registry), Some(Value::from(4_i32)));
        assert!(matches!(
            registry.manifest_errors(),
            [ManifestError::UnknownDeserializer { line: 3, .. }]
        ));
    }

    #[test]
    fn manifest_renames_types() {
        let sources = DeclaredSources::empty().with_manifest(ManifestResource::new(
            "test",
            "[types]\nlegacy::Point = test::Point",
        ));
        let registry = DeserializerRegistry::with_sources(types(), sources);

        let types = registry.types().read();
        let resolved = types.resolve("legacy::Point").unwrap();
        assert_eq!(resolved.ty, point());
        assert_eq!(resolved.renamed_from.as_deref(), Some("legacy::Point"));
    }

    #[test]
    fn unreadable_manifest_is_skipped() {
        let sources = declared_sources().with_manifest_path("/nonexistent/bw_wire/test.manifest");
        let registry = DeserializerRegistry::with_sources(types(), sources);

        assert_eq!(marker_of(&registry), Some(Value::from(3_i32)));
        assert!(matches!(registry.manifest_errors(), [ManifestError::Io { .. }]));
    }

    // -------------------------------------------------------------------------
    // Migrations

    fn person() -> Arc<DynamicMetaBean> {
        DynamicMetaBean::new(Type::bean("test::Person"))
            .with_property(DynamicProperty::new("first_name", String::type_descriptor()))
            .with_property(DynamicProperty::new("last_name", String::type_descriptor()))
            .into_arc()
    }

    /// `surname` became `last_name`, `nickname` was removed.
    struct PersonV2;

    impl BeanDeserializer for PersonV2 {
        fn find_meta_property(&self, _: &Type, meta: &dyn MetaBean, name: &str) -> PropertyLookup {
            let name = match name {
                "surname" => "last_name",
                "nickname" => return PropertyLookup::Discard,
                name => name,
            };
            meta.property(name)
                .map_or(PropertyLookup::Unknown, PropertyLookup::Found)
        }
    }

    #[test]
    fn renamed_and_removed_properties() {
        let types = TypeRegistryArc::default();
        types.write().register_bean(person());
        let registry = DeserializerRegistry::with_sources(types, DeclaredSources::empty());
        let ty = Type::bean("test::Person");

        let stored = [
            ("first_name", Value::from("Ada")),
            ("surname", Value::from("Lovelace")),
            ("nickname", Value::from("Countess")),
        ];
        assert!(matches!(
            registry.read_bean(&ty, stored.clone(), ReadPolicy::Strict),
            Err(MigrateError::UnknownProperty { .. })
        ));

        registry.register(&ty, PersonV2);
        let bean = registry.read_bean(&ty, stored, ReadPolicy::Strict).unwrap();
        assert_eq!(bean.property_value("last_name"), Some(Value::from("Lovelace")));
        assert_eq!(bean.property_value("nickname"), None);
    }

    /// `first_name` and `last_name` were merged into `name`.
    struct MergedName {
        parts: Arc<DynamicMetaBean>,
    }

    impl MergedName {
        fn new() -> Self {
            Self { parts: person() }
        }
    }

    impl BeanDeserializer for MergedName {
        fn create_builder(&self, _: &Type, meta: &Arc<dyn MetaBean>) -> Box<dyn BeanBuilder> {
            Box::new(BufferingBuilder::new(meta.clone()))
        }

        fn find_meta_property(&self, _: &Type, meta: &dyn MetaBean, name: &str) -> PropertyLookup {
            meta.property(name)
                .or_else(|| self.parts.property(name))
                .map_or(PropertyLookup::Unknown, PropertyLookup::Found)
        }

        fn build(
            &self,
            ty: &Type,
            mut builder: Box<dyn BeanBuilder>,
        ) -> Result<Box<dyn crate::bean::Bean>, MigrateError> {
            let buffer = builder
                .downcast_mut::<BufferingBuilder>()
                .ok_or_else(|| MigrateError::Migration {
                    bean: ty.path().into(),
                    reason: "unexpected builder".into(),
                })?;
            let first = buffer.take("first_name");
            let last = buffer.take("last_name");
            if let (Some(Value::String(first)), Some(Value::String(last))) = (first, last) {
                let name = buffer.meta_bean().property("name").unwrap();
                buffer.insert(name, Value::from(format!("{first} {last}")));
            }
            Ok(builder.build()?)
        }
    }

    #[test]
    fn merged_properties() {
        let ty = Type::bean("test::Contact");
        let types = TypeRegistryArc::default();
        types.write().register_bean(
            DynamicMetaBean::new(ty.clone())
                .with_property(DynamicProperty::new("name", String::type_descriptor()))
                .into_arc(),
        );
        let registry = DeserializerRegistry::with_sources(types, DeclaredSources::empty());
        registry.register(&ty, MergedName::new());

        let stored = [
            ("first_name", Value::from("Grace")),
            ("last_name", Value::from("Hopper")),
        ];
        let bean = registry.read_bean(&ty, stored, ReadPolicy::Strict).unwrap();
        assert_eq!(bean.property_value("name"), Some(Value::from("Grace Hopper")));
    }
}
