//! Small shared utilities for the `bw` crates.
//!
//! At present this is the fixed-seed hash container family used by the
//! serialization core for value sets, value maps and per-operation caches.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
