//! # Error Hierarchy
//!
//! Validation errors for the domain primitives, built with `thiserror`.
//! Each crate above `ssp-core` wraps these in its own error enum.

use thiserror::Error;

/// Errors raised by validated constructors of domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A control identifier was empty after trimming.
    #[error("control identifier must not be empty")]
    EmptyControlId,

    /// A status token did not name one of Comply, Partial, or Gap.
    #[error("unknown status: \"{0}\" (expected Comply, Partial, or Gap)")]
    UnknownStatus(String),

    /// A capability token did not name one of the five categories.
    #[error("unknown capability: \"{0}\" (expected policy, hardening, monitoring, crypto, or network)")]
    UnknownCapability(String),
}
