//! Type lookup by path, including historical renames.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: every type the core can name, and bean descriptions.
//! - [`TypeRegistryArc`]: a shared registry behind a `RwLock`.
//! - [`RenameTable`]: historical paths mapped to current ones.
//! - [`ResolvedType`]: the result of a rename-aware lookup.

// -----------------------------------------------------------------------------
// Modules

mod rename;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use rename::RenameTable;
pub use type_registry::{ResolvedType, TypeRegistry, TypeRegistryArc};
