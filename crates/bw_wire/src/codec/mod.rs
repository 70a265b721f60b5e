//! Compact type tokens.
//!
//! Every typed value on the wire carries a type token. [`TypeCodec`] keeps
//! these tokens short: well-known types use a fixed token, types of the
//! base package drop the package, and other types switch to their simple
//! name after the first occurrence. The [`TypeCache`] remembering these
//! choices lives for a single document.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod error;
mod parse;
mod type_codec;

// -----------------------------------------------------------------------------
// Exports

pub use cache::TypeCache;
pub use error::CodecError;
pub use type_codec::TypeCodec;
