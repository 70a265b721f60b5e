use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::warn;

use crate::migrate::ManifestError;

// -----------------------------------------------------------------------------
// Manifest

/// One `[deserializers]` entry: the deserializer named `name` reads the
/// bean type at `target`, or at the declaration's own target if `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The manifest the entry was read from.
    pub manifest: String,
    pub target: Option<String>,
    pub name: String,
    pub line: usize,
}

/// The parsed contents of one or more manifests.
///
/// A manifest is line oriented:
///
/// ```text
/// # comment
/// [deserializers]
/// app::Person = app::migrate::PersonV2
/// app::migrate::AddressV3
///
/// [types]
/// app::old::Person = app::Person
/// ```
///
/// Lines that cannot be understood are reported in [`errors`](Self::errors),
/// logged, and skipped. The rest of the manifest is still used.
#[derive(Debug, Default)]
pub struct Manifest {
    pub deserializers: Vec<ManifestEntry>,
    pub renames: Vec<(String, String)>,
    pub errors: Vec<ManifestError>,
}

#[derive(Clone, Copy)]
enum Section {
    Deserializers,
    Types,
}

fn is_path(text: &str) -> bool {
    !text.is_empty()
        && text
            .split("::")
            .all(|part| !part.is_empty() && part.chars().all(|c| c == '_' || c.is_alphanumeric()))
}

impl Manifest {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one manifest, `name` identifies it in diagnostics.
    pub fn parse(name: &str, contents: &str) -> Self {
        let mut manifest = Self::new();
        manifest.merge(name, contents);
        manifest
    }

    /// Parses one more manifest, appending its entries.
    pub fn merge(&mut self, name: &str, contents: &str) {
        let mut section = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = index + 1;
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }

            if let Some(header) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                section = match header.trim() {
                    "deserializers" => Some(Section::Deserializers),
                    "types" => Some(Section::Types),
                    other => {
                        self.error(ManifestError::UnknownSection {
                            manifest: name.to_string(),
                            line,
                            section: other.to_string(),
                        });
                        None
                    }
                };
                continue;
            }

            let Some(current) = section else {
                self.error(ManifestError::NoSection {
                    manifest: name.to_string(),
                    line,
                });
                continue;
            };

            let (left, right) = match text.split_once('=') {
                Some((left, right)) => (Some(left.trim()), right.trim()),
                None => (None, text),
            };
            let valid = is_path(right) && left.is_none_or(is_path);

            match (current, left) {
                (Section::Deserializers, target) if valid => {
                    self.deserializers.push(ManifestEntry {
                        manifest: name.to_string(),
                        target: target.map(ToString::to_string),
                        name: right.to_string(),
                        line,
                    });
                }
                (Section::Types, Some(old)) if valid => {
                    self.renames.push((old.to_string(), right.to_string()));
                }
                _ => self.error(ManifestError::Syntax {
                    manifest: name.to_string(),
                    line,
                    text: text.to_string(),
                }),
            }
        }
    }

    /// Records a problem and logs it.
    pub(crate) fn error(&mut self, error: ManifestError) {
        warn!("skipping manifest entry: {error}");
        self.errors.push(error);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deserializers.is_empty() && self.renames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Manifest, ManifestEntry};
    use crate::migrate::ManifestError;

    const TEXT: &str = "
# defaults for the address book
[deserializers]
app::Person = app::migrate::PersonV2   # renamed surname
app::migrate::AddressV3

[types]
app::old::Person = app::Person
";

    #[test]
    fn sections() {
        let manifest = Manifest::parse("book", TEXT);
        assert!(manifest.errors.is_empty());
        assert_eq!(
            manifest.deserializers,
            [
                ManifestEntry {
                    manifest: "book".into(),
                    target: Some("app::Person".into()),
                    name: "app::migrate::PersonV2".into(),
                    line: 4,
                },
                ManifestEntry {
                    manifest: "book".into(),
                    target: None,
                    name: "app::migrate::AddressV3".into(),
                    line: 5,
                },
            ]
        );
        assert_eq!(
            manifest.renames,
            [(String::from("app::old::Person"), String::from("app::Person"))]
        );
    }

    #[test]
    fn bad_lines_are_skipped() {
        let text = "
app::Orphan
[deserializers]
app::A =
app::B = app::migrate::B
not a path
[plugins]
app::C
[types]
app::Lonely
";
        let manifest = Manifest::parse("broken", text);

        assert_eq!(manifest.deserializers.len(), 1);
        assert_eq!(manifest.deserializers[0].name, "app::migrate::B");
        assert!(manifest.renames.is_empty());

        let errors = &manifest.errors;
        assert_eq!(errors.len(), 6);
        assert!(matches!(errors[0], ManifestError::NoSection { line: 2, .. }));
        assert!(matches!(errors[1], ManifestError::Syntax { line: 4, .. }));
        assert!(matches!(errors[2], ManifestError::Syntax { line: 6, .. }));
        assert!(matches!(
            &errors[3],
            ManifestError::UnknownSection { section, .. } if section == "plugins"
        ));
        assert!(matches!(errors[4], ManifestError::NoSection { line: 8, .. }));
        assert!(matches!(errors[5], ManifestError::Syntax { line: 10, .. }));
    }

    #[test]
    fn merge_appends() {
        let mut manifest = Manifest::parse("a", "[deserializers]\napp::A");
        manifest.merge("b", "[deserializers]\napp::B");
        let names: Vec<_> = manifest.deserializers.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["app::A", "app::B"]);
    }
}
