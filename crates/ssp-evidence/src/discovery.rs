//! # Candidate Discovery
//!
//! Lists the files under a root whose extension is in the allow-list.
//! Preferred subdirectories are enumerated first, so a tree mirroring the
//! known blueprint layout puts its configuration scripts at the front; a
//! full recursive walk of the root follows. The two passes are merged in
//! first-seen order and deduplicated by absolute path.
//!
//! Walks are sorted by file name. Entries that cannot be read are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::EvidenceConfig;

/// A discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path.
    pub path: PathBuf,
    /// Lower-cased extension with leading dot (e.g. `.ps1`).
    pub extension: String,
    /// Whether the file lives under a preferred subdirectory.
    pub preferred: bool,
}

impl Candidate {
    /// File name component, or empty.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Lower-cased extension with a leading dot, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Discover candidate files under `root`.
pub fn discover(root: &Path, config: &EvidenceConfig) -> Vec<Candidate> {
    let preferred_dirs: Vec<PathBuf> = config
        .preferred_subdirs
        .iter()
        .map(|sub| root.join(sub))
        .filter(|p| p.is_dir())
        .collect();

    let passes = preferred_dirs.iter().map(PathBuf::as_path).chain([root]);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for dir in passes {
        for path in walk_sorted(dir) {
            let Some(extension) = extension_of(&path) else {
                continue;
            };
            if config.weight_of(&extension).is_none() {
                continue;
            }
            if !seen.insert(path.clone()) {
                continue;
            }
            let preferred = preferred_dirs.iter().any(|d| path.starts_with(d));
            out.push(Candidate {
                path,
                extension,
                preferred,
            });
        }
    }

    tracing::debug!(
        root = %root.display(),
        candidates = out.len(),
        preferred_dirs = preferred_dirs.len(),
        "candidate discovery complete"
    );
    out
}

fn walk_sorted(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::trace!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str, body: &str) {
        let p = root.join(rel);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, body).unwrap();
    }

    fn names(cands: &[Candidate], root: &Path) -> Vec<String> {
        cands
            .iter()
            .map(|c| {
                c.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn empty_root_yields_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path(), &EvidenceConfig::default()).is_empty());
    }

    #[test]
    fn preferred_subdirs_come_first_and_are_not_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a_readme.md", "docs");
        touch(root, "policies/password.ps1", "x");
        touch(root, "config/netlogon.reg", "x");
        touch(root, "z_notes.txt", "x");

        let cands = discover(root, &EvidenceConfig::default());
        assert_eq!(
            names(&cands, root),
            vec![
                "config/netlogon.reg",
                "policies/password.ps1",
                "a_readme.md",
                "z_notes.txt",
            ]
        );
        assert!(cands[0].preferred && cands[1].preferred);
        assert!(!cands[2].preferred && !cands[3].preferred);
    }

    #[test]
    fn extensions_outside_allow_list_are_skipped_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "Setup.PS1", "x");
        touch(root, "tool.exe", "x");
        touch(root, "noext", "x");

        let cands = discover(root, &EvidenceConfig::default());
        assert_eq!(names(&cands, root), vec!["Setup.PS1"]);
        assert_eq!(cands[0].extension, ".ps1");
    }

    #[test]
    fn oversized_files_are_still_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "huge.txt", &"x".repeat(4096));
        let cfg = EvidenceConfig {
            max_read_bytes: 1024,
            ..EvidenceConfig::default()
        };
        assert_eq!(discover(root, &cfg).len(), 1);
    }

    #[test]
    fn discovery_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["b.json", "a.yaml", "c/d.ini", "configs/e.cfg"] {
            touch(root, name, "x");
        }
        let cfg = EvidenceConfig::default();
        assert_eq!(discover(root, &cfg), discover(root, &cfg));
    }
}
