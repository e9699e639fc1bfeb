//! # Bounded File Reads
//!
//! The single helper through which discovery, scoring, and value extraction
//! read file content. A file that is missing, not a regular file, larger
//! than the cap, or unreadable yields [`FileText::Empty`] rather than an
//! error, so one bad file never aborts processing of the others.

use std::path::Path;

/// Default read cap: 500 KB.
pub const DEFAULT_MAX_READ_BYTES: u64 = 512_000;

/// Content of a candidate file, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileText {
    /// Decoded content (invalid UTF-8 sequences replaced).
    Text(String),
    /// The file was missing, oversized, or unreadable.
    Empty,
}

impl FileText {
    /// Content as a string slice; empty for [`FileText::Empty`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Empty => "",
        }
    }

    /// Whether there is no usable content.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Lower-cased content for case-insensitive keyword checks.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_lowercase()
    }
}

/// Read a file's text if it is a regular file no larger than `max_bytes`.
pub fn read_small_text(path: &Path, max_bytes: u64) -> FileText {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "stat failed; treating as empty");
            return FileText::Empty;
        }
    };
    if !meta.is_file() {
        return FileText::Empty;
    }
    if meta.len() > max_bytes {
        tracing::trace!(
            path = %path.display(),
            size = meta.len(),
            cap = max_bytes,
            "file above read cap; content skipped"
        );
        return FileText::Empty;
    }
    match std::fs::read(path) {
        Ok(bytes) => FileText::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "read failed; treating as empty");
            FileText::Empty
        }
    }
}
