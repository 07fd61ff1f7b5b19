//! Ferret property-based testing library.
//!
//! This is the main entry point for Ferret, re-exporting the generators,
//! shrink sequences and property runner of `ferret-core` together with the
//! `Arbitrary` derive macro.

pub use ferret_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use ferret_derive::*;
