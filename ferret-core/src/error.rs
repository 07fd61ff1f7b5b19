//! Error types for Ferret.

use thiserror::Error;

/// Main error type for Ferret.
///
/// `InvalidRange` and `EmptyChoice` are contract violations: the
/// panicking constructors report them by panicking with this message, the
/// `try_` constructors return them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FerretError {
    /// A range was requested with `lo > hi`.
    #[error("Invalid range: lower bound {lo} is greater than upper bound {hi}")]
    InvalidRange { lo: String, hi: String },

    /// `one_of` was given no generators to choose from.
    #[error("Invalid generator: one_of requires at least one generator")]
    EmptyChoice,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Property test failed with a counterexample.
    #[error("Property test failed after {tests_run} tests and {shrinks_performed} shrinks: {counterexample}")]
    PropertyFailed {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
    },
}

/// Result type for Ferret operations.
pub type Result<T> = std::result::Result<T, FerretError>;
