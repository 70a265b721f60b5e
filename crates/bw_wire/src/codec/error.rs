use alloc::string::String;

use thiserror::Error;

/// An error decoding a type token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// No type is known under this token, even after following renames.
    #[error("unknown type `{token}`")]
    TypeNotFound { token: String },
    /// The generic syntax of a token is broken.
    #[error("malformed type token `{token}`: {reason}")]
    Malformed { token: String, reason: &'static str },
}
