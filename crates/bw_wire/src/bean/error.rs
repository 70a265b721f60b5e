use alloc::string::String;

use thiserror::Error;

use crate::info::Type;

/// An error raised while building a bean.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BeanError {
    /// The bean type has no property of this name.
    #[error("bean `{bean}` has no property `{property}`")]
    UnknownProperty { bean: Type, property: String },
    /// The value was rejected by the property.
    #[error("invalid value for `{bean}.{property}`: {reason}")]
    InvalidValue {
        bean: Type,
        property: String,
        reason: String,
    },
    /// A required property was never set.
    #[error("bean `{bean}` is missing required property `{property}`")]
    MissingProperty { bean: Type, property: String },
}
