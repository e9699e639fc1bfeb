//! Error types for evidence resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing evidence roots or validating configuration.
///
/// Per-file read problems are never errors; see [`crate::read::FileText`].
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// The archive could not be opened or extracted.
    #[error("failed to extract archive {path}: {source}")]
    Archive {
        /// Archive that failed.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// Filesystem error while preparing a root.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Evidence configuration is inconsistent.
    #[error("invalid evidence configuration: {0}")]
    InvalidConfig(String),
}
