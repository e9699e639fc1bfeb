//! # Root Resolution
//!
//! Normalizes a user-supplied path into a browsable directory root:
//!
//! | Input | Result |
//! |-------|--------|
//! | `None` / empty path | no root |
//! | existing directory | canonical absolute directory |
//! | existing `.zip` file | extracted into a fresh `sysroot_*` temp directory |
//! | anything else | no root |
//!
//! An absent root is not an error; it produces empty evidence downstream.
//! The extraction directory is owned by the [`ResolvedRoot`] and removed
//! when it is dropped, so roots should be resolved once per run.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::EvidenceError;

/// A directory ready for discovery.
#[derive(Debug)]
pub struct ResolvedRoot {
    path: PathBuf,
    // Keeps an extracted archive alive for the lifetime of the root.
    _scratch: Option<TempDir>,
}

impl ResolvedRoot {
    /// Absolute path of the root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this root was produced by extracting an archive.
    pub fn is_extracted(&self) -> bool {
        self._scratch.is_some()
    }
}

/// Resolve an optional path or archive into a directory root.
///
/// Failures (missing path, unsupported file, corrupt archive) are logged and
/// reported as `None`.
pub fn resolve_root(input: Option<&Path>) -> Option<ResolvedRoot> {
    let input = input?;
    if input.as_os_str().is_empty() {
        return None;
    }

    if input.is_dir() {
        return match input.canonicalize() {
            Ok(path) => Some(ResolvedRoot {
                path,
                _scratch: None,
            }),
            Err(e) => {
                tracing::warn!(path = %input.display(), error = %e, "cannot canonicalize root");
                None
            }
        };
    }

    if input.is_file() && is_zip(input) {
        return match extract_archive(input) {
            Ok(root) => Some(root),
            Err(e) => {
                tracing::warn!(error = %e, "archive root unavailable");
                None
            }
        };
    }

    tracing::debug!(path = %input.display(), "root does not resolve to a directory or archive");
    None
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn extract_archive(archive: &Path) -> Result<ResolvedRoot, EvidenceError> {
    let io_err = |source| EvidenceError::Io {
        path: archive.to_path_buf(),
        source,
    };
    let zip_err = |source| EvidenceError::Archive {
        path: archive.to_path_buf(),
        source,
    };

    let scratch = tempfile::Builder::new()
        .prefix("sysroot_")
        .tempdir()
        .map_err(io_err)?;
    let file = File::open(archive).map_err(io_err)?;
    let mut zip = zip::ZipArchive::new(file).map_err(zip_err)?;
    zip.extract(scratch.path()).map_err(zip_err)?;

    let path = scratch.path().canonicalize().map_err(io_err)?;
    tracing::info!(
        archive = %archive.display(),
        root = %path.display(),
        entries = zip.len(),
        "extracted archive root"
    );
    Ok(ResolvedRoot {
        path,
        _scratch: Some(scratch),
    })
}
