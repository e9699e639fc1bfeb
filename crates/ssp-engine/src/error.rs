//! Error types for the decision engine.

use thiserror::Error;

use ssp_core::ValidationError;

/// Errors raised while building validators from configuration.
///
/// Deciding a control never fails; missing values produce
/// [`crate::Verdict::Undecided`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// A value-extraction pattern failed to compile.
    #[error("invalid pattern for {validator}: {source}")]
    Pattern {
        /// Validator being built.
        validator: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A validator specification is unusable.
    #[error("invalid validator specification: {0}")]
    InvalidSpec(String),

    /// A control identifier in configuration was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
