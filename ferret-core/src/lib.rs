//! Core functionality for Ferret property-based testing.
//!
//! This crate provides the building blocks: a value-threaded random
//! [`Seed`], size-aware [`Gen`] combinators, lazy [`Shrinks`] sequences,
//! the [`Arbitrary`] capability with instances for common types, and a
//! small [`Property`] runner that searches for minimal counterexamples.

pub mod arbitrary;
pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod shrinks;
pub mod tree;

// Re-export the main types
pub use arbitrary::*;
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use shrinks::Shrinks;
pub use tree::*;
