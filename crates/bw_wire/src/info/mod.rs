//! Type identity and container classification.
//!
//! ## Menu
//!
//! - [`TypePath`]: static accessor to the path of a non-generic type.
//! - [`Typed`]: static accessor to the full [`TypeDescriptor`] of a type, generics included.
//! - [`Type`]: runtime handle to a raw type identity, with its [`TypeKind`].
//! - [`TypeDescriptor`]: a raw [`Type`] plus generic arguments.
//! - [`ContainerCategory`]: the shape of a container (list, map, table ...).
//! - [`ContainerKind`]: static description of one container kind and its wire tag.
//! - [`known`]: the fixed table of well-known scalar types and their short tokens.

// -----------------------------------------------------------------------------
// Modules

mod category;
mod descriptor;
mod ty;
mod type_path;

pub mod known;

// -----------------------------------------------------------------------------
// Exports

pub use category::{ContainerCategory, ContainerKind};
pub use descriptor::TypeDescriptor;
pub use ty::{Type, TypeKind};
pub use type_path::{TypePath, Typed};
