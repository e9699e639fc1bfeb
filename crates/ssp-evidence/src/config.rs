//! # Evidence Configuration
//!
//! Read-only tables that drive discovery and scoring. Built once at startup
//! (from defaults or a YAML file) and passed into [`crate::EvidenceBuilder`];
//! tests substitute alternate tables without any process-wide state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EvidenceError;
use crate::hints::HintTable;
use crate::read::DEFAULT_MAX_READ_BYTES;

/// Discovery and scoring parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Subdirectories (relative to a root) that are enumerated first and
    /// earn a scoring bonus.
    pub preferred_subdirs: Vec<String>,
    /// Extension (with leading dot) → preference weight. Doubles as the
    /// discovery allow-list.
    pub extension_weights: BTreeMap<String, i64>,
    /// Files larger than this are listed but never read.
    pub max_read_bytes: u64,
    /// Number of ranked files kept per root.
    pub top_n: usize,
    /// Keyword hint tables.
    pub hints: HintTable,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            preferred_subdirs: [
                "static/content/files/configscripts",
                "static/content/files/text",
                "config",
                "configs",
                "policies",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            extension_weights: default_extension_weights(),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            top_n: 20,
            hints: HintTable::default(),
        }
    }
}

/// Scripts and registry exports first, structured config next, then plain
/// text, with documentation formats last.
pub fn default_extension_weights() -> BTreeMap<String, i64> {
    [
        (".ps1", 100),
        (".psm1", 100),
        (".bat", 95),
        (".cmd", 95),
        (".sh", 95),
        (".reg", 95),
        (".json", 90),
        (".yaml", 90),
        (".yml", 90),
        (".ini", 90),
        (".cfg", 90),
        (".conf", 90),
        (".xml", 85),
        (".toml", 85),
        (".txt", 70),
        (".md", 20),
        (".rst", 15),
        (".adoc", 15),
    ]
    .into_iter()
    .map(|(ext, w)| (ext.to_string(), w))
    .collect()
}

impl EvidenceConfig {
    /// Normalize keys and reject unusable settings.
    ///
    /// Extensions are lower-cased and given a leading dot; preferred
    /// subdirectories lose leading `./` and surrounding slashes.
    pub fn normalized(mut self) -> Result<Self, EvidenceError> {
        if self.top_n == 0 {
            return Err(EvidenceError::InvalidConfig(
                "top_n must be at least 1".into(),
            ));
        }
        if self.extension_weights.is_empty() {
            return Err(EvidenceError::InvalidConfig(
                "extension_weights must not be empty".into(),
            ));
        }

        self.extension_weights = self
            .extension_weights
            .into_iter()
            .map(|(ext, w)| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    (ext, w)
                } else {
                    (format!(".{ext}"), w)
                }
            })
            .collect();

        self.preferred_subdirs = self
            .preferred_subdirs
            .into_iter()
            .map(|s| {
                let s = s.trim();
                let s = s.strip_prefix("./").unwrap_or(s);
                s.trim_matches(|c| c == '/' || c == '\\').to_string()
            })
            .filter(|s| !s.is_empty())
            .collect();

        Ok(self)
    }

    /// Preference weight of a lower-cased extension (with dot), if allowed.
    pub fn weight_of(&self, ext: &str) -> Option<i64> {
        self.extension_weights.get(ext).copied()
    }
}
