use alloc::string::String;
use std::io;

use thiserror::Error;

use crate::bean::BeanError;

/// An error reading a bean through a [`BeanDeserializer`](super::BeanDeserializer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MigrateError {
    /// The type has no registered [`MetaBean`](crate::bean::MetaBean).
    #[error("no bean description for type `{ty}`")]
    MetaBeanNotFound { ty: String },
    /// A stored property matches nothing in the current bean, strict reads only.
    #[error("unknown property `{property}` of bean `{bean}`")]
    UnknownProperty { bean: String, property: String },
    /// A migration step rejected the stored data.
    #[error("cannot migrate `{bean}`: {reason}")]
    Migration { bean: String, reason: String },
    #[error(transparent)]
    Bean(#[from] BeanError),
}

/// A problem in one manifest.
///
/// Manifest errors never abort loading: the offending line or file is
/// logged and skipped.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ManifestError {
    #[error("{manifest}:{line}: cannot parse `{text}`")]
    Syntax {
        manifest: String,
        line: usize,
        text: String,
    },
    #[error("{manifest}:{line}: unknown section `[{section}]`")]
    UnknownSection {
        manifest: String,
        line: usize,
        section: String,
    },
    #[error("{manifest}:{line}: entry outside of any section")]
    NoSection { manifest: String, line: usize },
    #[error("{manifest}:{line}: unknown deserializer `{name}`")]
    UnknownDeserializer {
        manifest: String,
        line: usize,
        name: String,
    },
    #[error("cannot read manifest `{path}`")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
