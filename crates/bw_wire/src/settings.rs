//! Runtime configuration.
//!
//! [`WireSettings`] gathers the knobs of every component in one
//! serializable value and derives each component's configuration from it.

use alloc::string::String;
use alloc::vec::Vec;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::buffer::{DEFAULT_SEGMENT_SIZE, SegmentedBuffer};
use crate::codec::TypeCodec;
use crate::container::ReadOptions;
use crate::migrate::{DeclaredSources, DeserializerRegistry, ReadPolicy};
use crate::registry::TypeRegistryArc;

// -----------------------------------------------------------------------------
// WireSettings

/// The runtime configuration of the serialization core.
///
/// Missing fields take their default value when deserialized.
///
/// # Examples
///
/// ```
/// use bw_wire::migrate::ReadPolicy;
/// use bw_wire::settings::WireSettings;
///
/// let settings: WireSettings = serde_json::from_str(r#"{ "lenient": true }"#).unwrap();
///
/// assert!(settings.compact_types);
/// assert_eq!(settings.read_policy(), ReadPolicy::Lenient);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireSettings {
    /// Write types as short tokens instead of full paths.
    pub compact_types: bool,
    /// Types under this module are written relative to it.
    pub base_package: Option<String>,
    /// Drop unknown properties instead of failing.
    pub lenient: bool,
    /// Iterate primitive arrays element by element.
    pub box_primitive_arrays: bool,
    pub segment_size: usize,
    /// Manifest files read in addition to the collected manifests.
    pub manifest_paths: Vec<PathBuf>,
}

impl Default for WireSettings {
    fn default() -> Self {
        Self {
            compact_types: true,
            base_package: None,
            lenient: false,
            box_primitive_arrays: false,
            segment_size: DEFAULT_SEGMENT_SIZE,
            manifest_paths: Vec::new(),
        }
    }
}

impl WireSettings {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compact_types(mut self, compact_types: bool) -> Self {
        self.compact_types = compact_types;
        self
    }

    pub fn with_base_package(mut self, base_package: impl Into<String>) -> Self {
        self.base_package = Some(base_package.into());
        self
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn with_box_primitive_arrays(mut self, box_primitive_arrays: bool) -> Self {
        self.box_primitive_arrays = box_primitive_arrays;
        self
    }

    pub fn with_segment_size(mut self, segment_size: usize) -> Self {
        self.segment_size = segment_size;
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_paths.push(path.into());
        self
    }

    /// Creates a type codec over `registry`.
    pub fn type_codec(&self, registry: &TypeRegistryArc) -> TypeCodec {
        let codec = TypeCodec::new(registry.clone()).with_compact(self.compact_types);
        match &self.base_package {
            Some(base_package) => codec.with_base_package(base_package.as_str()),
            None => codec,
        }
    }

    #[inline]
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            box_primitive_arrays: self.box_primitive_arrays,
        }
    }

    #[inline]
    pub fn read_policy(&self) -> ReadPolicy {
        if self.lenient {
            ReadPolicy::Lenient
        } else {
            ReadPolicy::Strict
        }
    }

    #[inline]
    pub fn segmented_buffer(&self) -> SegmentedBuffer {
        SegmentedBuffer::with_segment_size(self.segment_size)
    }

    /// Returns the collected declarations and manifests plus the
    /// configured manifest files.
    pub fn declared_sources(&self) -> DeclaredSources {
        self.manifest_paths
            .iter()
            .fold(DeclaredSources::collected(), |sources, path| {
                sources.with_manifest_path(path.clone())
            })
    }

    /// Creates a deserializer registry over `types`.
    pub fn deserializer_registry(&self, types: TypeRegistryArc) -> DeserializerRegistry {
        DeserializerRegistry::with_sources(types, self.declared_sources())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::WireSettings;
    use crate::info::{Type, TypeDescriptor};
    use crate::migrate::ReadPolicy;
    use crate::registry::{TypeRegistry, TypeRegistryArc};

    #[test]
    fn defaults() {
        let settings = WireSettings::default();
        assert!(settings.compact_types);
        assert!(!settings.lenient);
        assert_eq!(settings.segment_size, 4096);
        assert_eq!(settings.read_policy(), ReadPolicy::Strict);
        assert!(!settings.read_options().box_primitive_arrays);
    }

    #[test]
    fn partial_json() {
        let json = r#"{
            "base_package": "app::model",
            "segment_size": 512,
            "manifest_paths": ["a.manifest"]
        }"#;
        let settings: WireSettings = serde_json::from_str(json).unwrap();

        assert_eq!(
            settings,
            WireSettings::new()
                .with_base_package("app::model")
                .with_segment_size(512)
                .with_manifest_path("a.manifest")
        );
        assert_eq!(settings.segmented_buffer().segment_size(), 512);
        assert_eq!(settings.declared_sources().paths, [PathBuf::from("a.manifest")]);
    }

    #[test]
    fn ron_round_trip() {
        let settings = WireSettings::new()
            .with_compact_types(false)
            .with_lenient(true)
            .with_box_primitive_arrays(true);

        let text = ron::to_string(&settings).unwrap();
        let parsed: WireSettings = ron::from_str(&text).unwrap();
        assert_eq!(parsed, settings);

        let parsed: WireSettings = ron::from_str("(lenient: true)").unwrap();
        assert_eq!(parsed.read_policy(), ReadPolicy::Lenient);
    }

    #[test]
    fn codec_follows_settings() {
        let mut registry = TypeRegistry::new();
        registry.register_type(Type::bean("app::model::Person"));
        let registry = TypeRegistryArc::new(registry);

        let settings = WireSettings::new().with_base_package("app::model");
        let codec = settings.type_codec(&registry);
        assert!(codec.is_compact());
        assert_eq!(codec.base_package(), Some("app::model::"));

        let full = settings.with_compact_types(false).type_codec(&registry);
        let mut cache = crate::codec::TypeCache::new();
        let descriptor = TypeDescriptor::of(Type::bean("app::model::Person"));
        assert_eq!(full.encode(&descriptor, &mut cache), "app::model::Person");
    }
}
