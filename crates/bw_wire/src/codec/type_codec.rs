use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::trace;

use crate::codec::parse::{TokenTree, parse};
use crate::codec::{CodecError, TypeCache};
use crate::info::{Type, TypeDescriptor, known};
use crate::registry::{TypeRegistry, TypeRegistryArc};

/// Converts [`TypeDescriptor`]s to wire tokens and back.
///
/// Well-known types always use their fixed token. Other types use their
/// full path, unless compact mode is on:
///
/// - a type under the base package whose remainder starts uppercase is
///   written as that remainder;
/// - any other type is written in full the first time, and by its simple
///   name afterwards if no other type claimed that name first.
///
/// Generic arguments follow the raw token as `<arg,arg>`.
///
/// # Examples
///
/// ```
/// use bw_wire::bean::DynamicMetaBean;
/// use bw_wire::codec::{TypeCache, TypeCodec};
/// use bw_wire::info::{Type, TypeDescriptor, Typed};
/// use bw_wire::registry::{TypeRegistry, TypeRegistryArc};
///
/// let registry = TypeRegistryArc::new(TypeRegistry::new());
/// let person = Type::bean("app::model::Person");
/// registry.write().register_bean(DynamicMetaBean::new(person.clone()).into_arc());
///
/// let codec = TypeCodec::new(registry).with_base_package("app::model");
/// let declared = TypeDescriptor::new(
///     <Vec<i32>>::type_descriptor().raw().clone(),
///     [TypeDescriptor::of(person)],
/// );
///
/// let mut cache = TypeCache::new();
/// let token = codec.encode(&declared, &mut cache);
/// assert_eq!(token, "alloc::vec::Vec<Person>");
/// assert_eq!(codec.encode(&declared, &mut cache), "Vec<Person>");
///
/// let mut cache = TypeCache::new();
/// assert_eq!(codec.decode(&token, &mut cache, None).unwrap(), declared);
/// ```
#[derive(Debug, Clone)]
pub struct TypeCodec {
    registry: TypeRegistryArc,
    compact: bool,
    base_package: Option<String>,
}

impl TypeCodec {
    /// Creates a compact codec without base package.
    #[inline]
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self {
            registry,
            compact: true,
            base_package: None,
        }
    }

    #[inline]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets the base package, `::` is appended when missing.
    pub fn with_base_package(mut self, base_package: impl Into<String>) -> Self {
        let mut base_package = base_package.into();
        if !base_package.ends_with("::") {
            base_package.push_str("::");
        }
        self.base_package = Some(base_package);
        self
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    #[inline]
    pub fn base_package(&self) -> Option<&str> {
        self.base_package.as_deref()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Encode

    /// Encodes a descriptor, generic arguments included.
    pub fn encode(&self, descriptor: &TypeDescriptor, cache: &mut TypeCache) -> String {
        let mut out = String::new();
        self.encode_into(descriptor, cache, &mut out);
        out
    }

    fn encode_into(&self, descriptor: &TypeDescriptor, cache: &mut TypeCache, out: &mut String) {
        out.push_str(&self.encode_type(descriptor.raw(), cache));
        if let Some((first, rest)) = descriptor.args().split_first() {
            out.push('<');
            self.encode_into(first, cache, out);
            for arg in rest {
                out.push(',');
                self.encode_into(arg, cache, out);
            }
            out.push('>');
        }
    }

    /// Encodes a raw type without its generic arguments.
    pub fn encode_type(&self, ty: &Type, cache: &mut TypeCache) -> String {
        if let Some(token) = known::token_for(ty) {
            return token.into();
        }
        if let Some(enclosing) = ty.enclosing_enum() {
            return self.encode_type(enclosing, cache);
        }
        if !self.compact {
            return ty.path().into();
        }
        if let Some(token) = cache.token(ty) {
            return token.into();
        }

        let path = ty.path();
        if let Some(remainder) = self.base_remainder(path)
            && !cache.is_claimed(remainder)
        {
            trace!("type `{path}` written as `{remainder}` under the base package");
            cache.insert_token(ty.clone(), remainder.into());
            return remainder.into();
        }

        let name = ty.name();
        if !cache.is_claimed(name) && !known::is_known_token(name) {
            trace!("type `{path}` claims the short name `{name}`");
            cache.insert_token(ty.clone(), name.into());
        } else {
            trace!("short name `{name}` of `{path}` is taken, keeping the full path");
            cache.insert_token(ty.clone(), path.into());
        }
        path.into()
    }

    fn base_remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        let remainder = path.strip_prefix(self.base_package.as_deref()?)?;
        let starts_upper = remainder.chars().next().is_some_and(char::is_uppercase);
        (starts_upper && !known::is_known_token(remainder)).then_some(remainder)
    }

    // -------------------------------------------------------------------------
    // Decode

    /// Decodes a token, generic arguments included.
    ///
    /// `default` is returned instead of [`CodecError::TypeNotFound`] when a
    /// type of the token cannot be resolved.
    pub fn decode(
        &self,
        token: &str,
        cache: &mut TypeCache,
        default: Option<&TypeDescriptor>,
    ) -> Result<TypeDescriptor, CodecError> {
        let tree = parse(token).map_err(|reason| CodecError::Malformed {
            token: token.into(),
            reason,
        })?;
        let registry = self.registry.read();
        match self.decode_tree(&registry, &tree, cache) {
            Ok(descriptor) => Ok(descriptor),
            Err(missing) => match default {
                Some(default) => {
                    trace!("unknown type `{missing}`, using `{default}`");
                    Ok(default.clone())
                }
                None => Err(CodecError::TypeNotFound { token: missing }),
            },
        }
    }

    fn decode_tree(
        &self,
        registry: &TypeRegistry,
        tree: &TokenTree<'_>,
        cache: &mut TypeCache,
    ) -> Result<TypeDescriptor, String> {
        let raw = self
            .decode_type(registry, tree.raw, cache)
            .ok_or_else(|| tree.raw.to_string())?;
        let args = tree
            .args
            .iter()
            .map(|arg| self.decode_tree(registry, arg, cache))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeDescriptor::new(raw, args))
    }

    fn decode_type(
        &self,
        registry: &TypeRegistry,
        token: &str,
        cache: &mut TypeCache,
    ) -> Option<Type> {
        if let Some(ty) = known::type_for_token(token) {
            return Some(ty);
        }
        if let Some(ty) = cache.get(token) {
            return Some(ty.clone());
        }

        if let Some(base) = self.base_package.as_deref()
            && token.chars().next().is_some_and(char::is_uppercase)
        {
            let expanded = format!("{base}{token}");
            if let Some(resolved) = registry.resolve(&expanded) {
                trace!("token `{token}` expanded to `{}`", resolved.ty);
                cache.insert_type(&expanded, &resolved.ty);
                cache.insert_type(token, &resolved.ty);
                return Some(resolved.ty);
            }
        }

        let resolved = registry.resolve(token)?;
        cache.insert_type(token, &resolved.ty);
        let name = resolved.lookup_name();
        if !known::is_known_token(name) {
            trace!("token `{name}` now stands for `{}`", resolved.ty);
            cache.insert_type(name, &resolved.ty);
        }
        Some(resolved.ty)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::TypeCodec;
    use crate::Value;
    use crate::bean::DynamicMetaBean;
    use crate::codec::{CodecError, TypeCache};
    use crate::container::base::ValueArray;
    use crate::container::{FactoryChain, ReadOptions};
    use crate::info::{Type, TypeDescriptor, Typed};
    use crate::registry::{TypeRegistry, TypeRegistryArc};

    fn registry(types: &[Type]) -> TypeRegistryArc {
        let registry = TypeRegistryArc::new(TypeRegistry::new());
        for ty in types {
            registry.write().register_bean(DynamicMetaBean::new(ty.clone()).into_arc());
        }
        registry
    }

    fn list_of(arg: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::new(<Vec<i32>>::type_descriptor().raw().clone(), [arg])
    }

    fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> TypeDescriptor {
        let raw = <BTreeMap<i32, i32>>::type_descriptor().raw().clone();
        TypeDescriptor::new(raw, [key, value])
    }

    #[test]
    fn round_trip_both_modes() {
        let person = Type::bean("app::model::Person");
        let registry = registry(&[person.clone()]);
        let declared = map_of(String::type_descriptor(), list_of(TypeDescriptor::of(person)));

        for compact in [false, true] {
            let codec = TypeCodec::new(registry.clone())
                .with_compact(compact)
                .with_base_package("app::model::");

            let mut write = TypeCache::new();
            let mut read = TypeCache::new();
            for _ in 0..3 {
                let token = codec.encode(&declared, &mut write);
                assert_eq!(codec.decode(&token, &mut read, None).unwrap(), declared);
            }
        }
    }

    #[test]
    fn array_meta_type_round_trips() {
        let chain = FactoryChain::standard();
        let array = ValueArray::new(String::type_descriptor(), vec![Value::from("x")]);
        let array = Value::container(array);
        let cursor = chain
            .read(&array, &TypeDescriptor::any(), ReadOptions::default())
            .unwrap();
        assert!(cursor.meta_type_required());

        let codec = TypeCodec::new(registry(&[]));
        let token = codec.encode(&cursor.meta_type(), &mut TypeCache::new());
        let meta_type = codec.decode(&token, &mut TypeCache::new(), None).unwrap();
        assert_eq!(meta_type, cursor.meta_type());

        let mut builder = chain.write_for_type(&meta_type).unwrap();
        builder.add_value(Value::from("x")).unwrap();
        assert_eq!(builder.build(), array);
    }

    #[test]
    fn full_mode_writes_paths() {
        let codec = TypeCodec::new(registry(&[])).with_compact(false);
        let mut cache = TypeCache::new();
        let declared = list_of(i64::type_descriptor());
        assert_eq!(codec.encode(&declared, &mut cache), "alloc::vec::Vec<i64>");
        assert_eq!(codec.encode(&declared, &mut cache), "alloc::vec::Vec<i64>");
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_is_idempotent() {
        let codec = TypeCodec::new(registry(&[Type::bean("other::Person")]));
        let person = Type::bean("other::Person");
        let mut cache = TypeCache::new();

        assert_eq!(codec.encode_type(&person, &mut cache), "other::Person");
        let len = cache.len();
        assert_eq!(codec.encode_type(&person, &mut cache), "Person");
        assert_eq!(codec.encode_type(&person, &mut cache), "Person");
        assert_eq!(cache.len(), len);
    }

    #[test]
    fn first_claim_wins() {
        let a = Type::bean("a::Person");
        let b = Type::bean("b::Person");
        let codec = TypeCodec::new(registry(&[a.clone(), b.clone()]));
        let mut write = TypeCache::new();

        let tokens: Vec<String> = [&a, &b, &a, &b]
            .into_iter()
            .map(|ty| codec.encode_type(ty, &mut write))
            .collect();
        assert_eq!(tokens, ["a::Person", "b::Person", "Person", "b::Person"]);

        let mut read = TypeCache::new();
        let decoded: Vec<Type> = tokens
            .iter()
            .map(|token| codec.decode(token, &mut read, None).unwrap().raw().clone())
            .collect();
        assert_eq!(decoded, [a.clone(), b.clone(), a, b]);
    }

    #[test]
    fn base_package_remainder() {
        let person = Type::bean("app::Person");
        let codec = TypeCodec::new(registry(&[person.clone()])).with_base_package("app");
        let mut cache = TypeCache::new();
        assert_eq!(codec.encode_type(&person, &mut cache), "Person");

        let mut read = TypeCache::new();
        let decoded = codec.decode("Person", &mut read, None).unwrap();
        assert_eq!(decoded.raw(), &person);
        assert_eq!(read.get("app::Person"), Some(&person));
    }

    #[test]
    fn well_known_tokens() {
        let codec = TypeCodec::new(registry(&[]));
        let mut cache = TypeCache::new();
        assert_eq!(codec.encode(&String::type_descriptor(), &mut cache), "String");
        assert_eq!(codec.encode(&TypeDescriptor::any(), &mut cache), "Value");
        assert!(cache.is_empty());

        // A type named like a well-known token never claims it.
        let string = Type::bean("text::String");
        assert_eq!(codec.encode_type(&string, &mut cache), "text::String");
        assert_eq!(codec.encode_type(&string, &mut cache), "text::String");
    }

    #[test]
    fn enum_constants_use_their_enum() {
        let op = Type::enumeration("calc::Op");
        let plus = Type::enum_constant("calc::Op::Plus", op);
        let codec = TypeCodec::new(registry(&[])).with_compact(false);
        let mut cache = TypeCache::new();
        assert_eq!(codec.encode_type(&plus, &mut cache), "calc::Op");
    }

    #[test]
    fn renamed_types() {
        let person = Type::bean("app::Person");
        let registry = registry(&[person.clone()]);
        registry.write().renames_mut().insert("legacy::Human", "app::Person");
        let codec = TypeCodec::new(registry);

        let mut read = TypeCache::new();
        let decoded = codec.decode("legacy::Human", &mut read, None).unwrap();
        assert_eq!(decoded.raw(), &person);
        // Old documents refer to the second occurrence by the old simple name.
        assert_eq!(codec.decode("Human", &mut read, None).unwrap().raw(), &person);
    }

    #[test]
    fn unknown_types() {
        let codec = TypeCodec::new(registry(&[]));
        let mut cache = TypeCache::new();
        assert_eq!(
            codec.decode("alloc::vec::Vec<nope::Missing>", &mut cache, None),
            Err(CodecError::TypeNotFound {
                token: "nope::Missing".into()
            })
        );

        let fallback = TypeDescriptor::any();
        assert_eq!(
            codec.decode("nope::Missing", &mut cache, Some(&fallback)),
            Ok(fallback)
        );
        assert!(matches!(
            codec.decode("Vec<", &mut cache, None),
            Err(CodecError::Malformed { .. })
        ));
    }
}
