use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use bw_utils::hash::{HashMap, HashSet};
use log::trace;

use crate::bean::MetaBean;
use crate::container::FactoryChain;
use crate::info::{Type, Typed, known};
use crate::registry::RenameTable;

// -----------------------------------------------------------------------------
// ResolvedType

/// The result of a rename-aware lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// The current type.
    pub ty: Type,
    /// The historical path that was looked up, if a rename was followed.
    pub renamed_from: Option<String>,
}

impl ResolvedType {
    /// Returns the simple name the lookup was made with.
    ///
    /// This is the last segment of the historical path when a rename was
    /// followed, of the current path otherwise.
    pub fn lookup_name(&self) -> &str {
        match &self.renamed_from {
            Some(path) => match path.rfind("::") {
                Some(index) => &path[index + 2..],
                None => path,
            },
            None => self.ty.name(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of the types known to the serialization core.
///
/// Types are looked up by full path, by unambiguous simple name, or through
/// the [`RenameTable`] of historical paths. Bean types additionally carry
/// their [`MetaBean`].
///
/// # Examples
///
/// ```
/// use bw_wire::bean::DynamicMetaBean;
/// use bw_wire::info::Type;
/// use bw_wire::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register_bean(DynamicMetaBean::new(Type::bean("app::Person")).into_arc());
/// registry.renames_mut().insert("legacy::Person", "app::Person");
///
/// assert!(registry.get_with_type_path("i32").is_some());
/// assert!(registry.get_with_type_name("Person").is_some());
///
/// let resolved = registry.resolve("legacy::Person").unwrap();
/// assert_eq!(resolved.ty.path(), "app::Person");
/// assert_eq!(resolved.renamed_from.as_deref(), Some("legacy::Person"));
/// ```
pub struct TypeRegistry {
    types: HashMap<Box<str>, Type>,
    type_names: HashMap<Box<str>, Type>,
    ambiguous_names: HashSet<Box<str>>,
    meta_beans: HashMap<Type, Arc<dyn MetaBean>>,
    renames: RenameTable,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            types: HashMap::default(),
            type_names: HashMap::default(),
            ambiguous_names: HashSet::default(),
            meta_beans: HashMap::default(),
            renames: RenameTable::new(),
        }
    }

    /// Creates a registry holding the well-known types and the container
    /// kinds of the standard factory chain.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (_, ty) in known::iter() {
            registry.register_type(ty.clone());
        }
        for kind in FactoryChain::standard().kinds() {
            registry.register_type(kind.ty());
        }
        registry
    }

    fn add_name_index(&mut self, ty: &Type) {
        let name = ty.name();
        if self.ambiguous_names.contains(name) {
            return;
        }
        if self.type_names.contains_key(name) {
            self.type_names.remove(name);
            self.ambiguous_names.insert(name.into());
        } else {
            self.type_names.insert(name.into(), ty.clone());
        }
    }

    /// Adds a type, returns `false` if its path was already registered.
    pub fn register_type(&mut self, ty: Type) -> bool {
        if self.types.contains_key(ty.path()) {
            return false;
        }
        self.add_name_index(&ty);
        self.types.insert(ty.path().into(), ty);
        true
    }

    /// Adds the raw type of `T`.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.register_type(T::type_descriptor().raw().clone())
    }

    /// Adds a bean type and its description, replacing a previous description.
    pub fn register_bean(&mut self, meta: Arc<dyn MetaBean>) {
        let ty = meta.bean_type();
        self.register_type(ty.clone());
        self.meta_beans.insert(ty, meta);
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    /// Returns the type registered under a full path.
    #[inline]
    pub fn get_with_type_path(&self, path: &str) -> Option<&Type> {
        self.types.get(path.strip_prefix("::").unwrap_or(path))
    }

    /// Returns the type with the given simple name.
    ///
    /// `None` if the name is ambiguous or unknown.
    #[inline]
    pub fn get_with_type_name(&self, name: &str) -> Option<&Type> {
        self.type_names.get(name)
    }

    /// Returns `true` if several registered types share this simple name.
    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    /// Returns the description of a bean type.
    #[inline]
    pub fn meta_bean(&self, ty: &Type) -> Option<Arc<dyn MetaBean>> {
        self.meta_beans.get(ty).cloned()
    }

    /// Returns the description of a bean type by path, following renames.
    pub fn meta_bean_for_path(&self, path: &str) -> Option<Arc<dyn MetaBean>> {
        let resolved = self.resolve(path)?;
        self.meta_bean(&resolved.ty)
    }

    #[inline]
    pub fn renames(&self) -> &RenameTable {
        &self.renames
    }

    #[inline]
    pub fn renames_mut(&mut self) -> &mut RenameTable {
        &mut self.renames
    }

    /// Looks up a full path, following historical renames when the path
    /// itself is not registered.
    pub fn resolve(&self, path: &str) -> Option<ResolvedType> {
        let path = path.strip_prefix("::").unwrap_or(path);
        if let Some(ty) = self.types.get(path) {
            return Some(ResolvedType {
                ty: ty.clone(),
                renamed_from: None,
            });
        }
        let current = self.renames.current(path)?;
        let ty = self.types.get(current)?;
        trace!("type `{path}` resolved through rename to `{current}`");
        Some(ResolvedType {
            ty: ty.clone(),
            renamed_from: Some(path.into()),
        })
    }

    /// Iterates over every registered type.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Type> {
        self.types.values()
    }

    /// Iterates over every registered bean description.
    pub fn iter_meta_beans(&self) -> impl ExactSizeIterator<Item = &Arc<dyn MetaBean>> {
        self.meta_beans.values()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared, lockable [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.internal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .keys()
            .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{TypeRegistry, TypeRegistryArc};
    use crate::bean::DynamicMetaBean;
    use crate::container::base;
    use crate::info::Type;

    #[test]
    fn preloaded_types() {
        let mut registry = TypeRegistry::new();
        assert!(registry.contains("alloc::string::String"));
        assert!(registry.contains("bw_wire::value::Value"));
        assert_eq!(registry.get_with_type_path("alloc::vec::Vec"), Some(&base::LIST.ty()));
        assert!(!registry.register::<String>());
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register_type(Type::bean("a::Person")));
        assert!(registry.get_with_type_name("Person").is_some());
        assert!(registry.register_type(Type::bean("b::Person")));
        assert!(registry.get_with_type_name("Person").is_none());
        assert!(registry.is_ambiguous("Person"));
        assert!(registry.register_type(Type::bean("c::Person")));
        assert!(registry.is_ambiguous("Person"));
        assert!(!registry.register_type(Type::bean("a::Person")));
    }

    #[test]
    fn resolve_renames() {
        let mut registry = TypeRegistry::empty();
        let person = Type::bean("app::Person");
        registry.register_bean(DynamicMetaBean::new(person.clone()).into_arc());
        registry.renames_mut().insert("old::Human", "app::Person");
        registry.renames_mut().insert("old::Robot", "app::Robot");

        let direct = registry.resolve("::app::Person").unwrap();
        assert_eq!(direct.ty, person);
        assert_eq!(direct.renamed_from, None);
        assert_eq!(direct.lookup_name(), "Person");

        let renamed = registry.resolve("old::Human").unwrap();
        assert_eq!(renamed.ty, person);
        assert_eq!(renamed.lookup_name(), "Human");
        assert!(registry.meta_bean_for_path("old::Human").is_some());

        // Renamed to a type that was never registered.
        assert!(registry.resolve("old::Robot").is_none());
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::default();
        shared.write().register_type(Type::bean("app::Shared"));
        let clone = shared.clone();
        assert!(clone.read().contains("app::Shared"));
    }
}
