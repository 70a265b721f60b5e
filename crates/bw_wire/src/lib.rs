//! The serialization core of the bean persistence layer.
//!
//! `bw_wire` converts structured values (beans, scalars and a wide family of
//! containers) into wire tokens and back, while keeping enough type
//! information to rebuild the exact container and element types.
//!
//! ## Menu
//!
//! - [`info`]: type identity ([`Type`](info::Type), [`TypeDescriptor`](info::TypeDescriptor))
//!   and container classification.
//! - [`value`]: the dynamic runtime [`Value`](value::Value) model.
//! - [`bean`]: the property-descriptor capability consumed by the core.
//! - [`container`]: uniform read cursors and write builders over every container kind,
//!   and the [`FactoryChain`](container::FactoryChain) that creates them.
//! - [`registry`]: type lookup by path, including historical renames.
//! - [`codec`]: compact type tokens with a per-operation cache.
//! - [`sniff`]: wire format detection and reader dispatch.
//! - [`migrate`]: per-type deserializers that reshape old data into current beans.
//! - [`buffer`]: segmented append-only output buffer.
//! - [`settings`]: runtime configuration.
//!
//! ## Features
//!
//! - `collect`: bidirectional maps, multimaps, multisets and tables.
//! - `grid`: dense and sparse grids.
//! - `auto_register`: static collection of declared deserializers through `inventory`.

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    bw_cfg::define_alias! {
        #[cfg(feature = "collect")] => collect,
        #[cfg(feature = "grid")] => grid,
        #[cfg(feature = "auto_register")] => auto_register,
    }
}

// -----------------------------------------------------------------------------
// Extern crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod bean;
pub mod buffer;
pub mod codec;
pub mod container;
pub mod info;
pub mod migrate;
pub mod registry;
pub mod settings;
pub mod sniff;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use info::{Type, TypeDescriptor};
pub use value::Value;

#[doc(hidden)]
pub mod __macro_exports {
    crate::cfg::auto_register! {
        pub use inventory;
    }
}
