//! # Safe Save
//!
//! A run never overwrites its input and never saves over a file that is
//! already there (an open workbook may hold a lock on it). The target is
//! `<stem>_<YYYYmmdd-HHMMSS><ext>` beside the requested output; when that
//! path is the input itself or already exists, `-1`, `-2`, ... is appended
//! to the stem until it is free.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::WorkbookError;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Timestamped sibling of `requested`, avoiding `input` and existing files.
pub fn timestamped_target(requested: &Path, input: &Path, at: NaiveDateTime) -> PathBuf {
    let parent = requested.parent().unwrap_or_else(|| Path::new(""));
    let stem = requested
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".into());
    let ext = requested
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = at.format(TIMESTAMP_FORMAT);

    let candidate = |suffix: String| parent.join(format!("{stem}_{stamp}{suffix}{ext}"));
    let mut target = candidate(String::new());
    let mut n = 1u32;
    while is_same_file(&target, input) || target.exists() {
        target = candidate(format!("-{n}"));
        n += 1;
    }
    target
}

/// Resolve the save target and create its parent directory.
pub fn prepare_target(
    requested: &Path,
    input: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, WorkbookError> {
    let target = timestamped_target(requested, input, at);
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| WorkbookError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(target)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
