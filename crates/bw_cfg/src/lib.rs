//! Macros for compile-time feature selection.
//!
//! A crate declares its feature aliases once with [`define_alias!`] and
//! then uses the generated macros instead of repeating `#[cfg(...)]`
//! predicates all over the code base:
//!
//! ```
//! pub mod cfg {
//!     pub(crate) use bw_cfg::switch;
//!
//!     bw_cfg::define_alias! {
//!         #[cfg(debug_assertions)] => debug,
//!         #[cfg(feature = "never_enabled")] => never,
//!     }
//! }
//!
//! cfg::debug! { fn only_in_debug() {} }
//!
//! let flag = cfg::never! { if { 1 } else { 2 } };
//! assert_eq!(flag, 2);
//!
//! let enabled = cfg::switch! {
//!     cfg::never => { "never" }
//!     _ => { "fallback" }
//! };
//! assert_eq!(enabled, "fallback");
//! ```
//!
//! Every generated alias supports three forms:
//!
//! - `alias! { items }`: keep `items` only if the predicate holds.
//! - `alias! { if { a } else { b } }`: pick one branch.
//! - `alias!()`: expands to `true` or `false`.
#![no_std]

/// Expands its input unconditionally, used for aliases whose predicate holds.
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($p)* };
    ($($p:tt)*) => { $($p)* };
}

/// Discards its input, used for aliases whose predicate does not hold.
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($n)* };
    ($($p:tt)*) => {};
}

/// Defines one alias macro per `#[cfg(...)] => name` entry.
///
/// The alias is a re-export of either [`enabled!`] or [`disabled!`],
/// selected by the predicate in the *calling* crate.
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $name:ident),+ $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc(inline)]
            #[allow(unused_imports)]
            pub use $crate::enabled as $name;

            #[cfg(not($meta))]
            #[doc(inline)]
            #[allow(unused_imports)]
            pub use $crate::disabled as $name;
        )+
    };
}

/// A `match`-like selection over alias macros.
///
/// The first arm whose alias is enabled wins; `_` is the fallback.
#[macro_export]
macro_rules! switch {
    () => {};
    (_ => { $($output:tt)* }) => {
        $($output)*
    };
    ($cond:path => $output:tt $($rest:tt)*) => {
        $cond! {
            if {
                $crate::switch! { _ => $output }
            } else {
                $crate::switch! { $($rest)* }
            }
        }
    };
}
