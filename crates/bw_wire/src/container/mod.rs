//! Uniform iteration over every container kind.
//!
//! Format writers walk a container through a [`ReadContainer`] cursor and
//! format readers fill a [`WriteContainer`] builder, neither needs to know
//! the concrete runtime container. Both are created by a [`FactoryChain`].
//!
//! ## Families
//!
//! - [`base`]: lists, sets, maps, their sorted variants and arrays. Always present.
//! - `collect`: bidirectional maps, multimaps, multisets and tables
//!   (cargo feature `collect`).
//! - `grid`: dense and sparse grids (cargo feature `grid`).
//!
//! ## Nested containers
//!
//! An element that is itself a container is handled by a child cursor or
//! builder, created from the parent's declared value type with
//! [`FactoryChain::read_child`] and [`FactoryChain::write_child`].

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod cursor;
mod error;
mod factory;
mod traits;

pub mod base;

crate::cfg::collect! {
    pub mod collect;
}

crate::cfg::grid! {
    pub mod grid;
}

// -----------------------------------------------------------------------------
// Exports

pub use cursor::meta_type_required;
pub use error::ContainerError;
pub use factory::{ContainerFactory, FactoryChain};
pub use traits::{ReadContainer, ReadOptions, WriteContainer};
