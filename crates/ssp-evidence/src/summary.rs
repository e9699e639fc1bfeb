//! # Evidence Summaries
//!
//! [`FileEvidence`] is the ranked evidence found in one root for one
//! control. Its fields are private so the two invariants hold by
//! construction:
//!
//! - `has == !files.is_empty()`
//! - `top_snippet_name` is the file name of `files[0]`, or empty.
//!
//! [`EvidenceSummary`] pairs the test-system evidence (authoritative) with
//! the gold-blueprint evidence (advisory only).

use std::path::{Path, PathBuf};

use serde::Serialize;

use ssp_core::ControlId;

use crate::config::EvidenceConfig;
use crate::discovery::discover;
use crate::root::ResolvedRoot;
use crate::scoring::rank;

/// Ranked evidence from a single root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEvidence {
    has: bool,
    top_snippet_name: String,
    files: Vec<PathBuf>,
}

impl FileEvidence {
    /// No evidence.
    pub fn empty() -> Self {
        Self {
            has: false,
            top_snippet_name: String::new(),
            files: Vec::new(),
        }
    }

    /// Build from files already ordered highest-ranked first.
    ///
    /// Paths without a file name are dropped, so `has()` implies a
    /// non-empty `top_snippet_name()`.
    pub fn from_ranked(mut files: Vec<PathBuf>) -> Self {
        files.retain(|p| p.file_name().is_some());
        let top_snippet_name = files
            .first()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            has: !files.is_empty(),
            top_snippet_name,
            files,
        }
    }

    /// Whether at least one file was found.
    pub fn has(&self) -> bool {
        self.has
    }

    /// File name of the highest-ranked file, or empty.
    pub fn top_snippet_name(&self) -> &str {
        &self.top_snippet_name
    }

    /// Ranked absolute paths.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

/// Evidence for one control across both roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceSummary {
    /// Control under assessment.
    pub control_id: ControlId,
    /// Description the keywords were derived from.
    pub description: String,
    /// Test-system evidence; the only input to a decision.
    pub test: FileEvidence,
    /// Gold-blueprint evidence; context only.
    pub gold: FileEvidence,
}

/// Builds [`EvidenceSummary`] values from a fixed configuration.
#[derive(Debug, Clone)]
pub struct EvidenceBuilder {
    config: EvidenceConfig,
}

impl EvidenceBuilder {
    /// Create a builder over the given configuration.
    pub fn new(config: EvidenceConfig) -> Self {
        Self { config }
    }

    /// Search terms for a control.
    pub fn keywords(&self, control: &ControlId, description: &str) -> Vec<String> {
        self.config.hints.keywords_for(control, description)
    }

    /// Discover, rank and truncate the files under one root.
    pub fn rank_root(&self, root: &Path, control: &ControlId, keywords: &[String]) -> Vec<PathBuf> {
        let candidates = discover(root, &self.config);
        let mut ranked = rank(&candidates, control, keywords, &self.config);
        ranked.truncate(self.config.top_n);
        ranked.into_iter().map(|r| r.path).collect()
    }

    /// Evidence from an optional root.
    pub fn file_evidence(
        &self,
        root: Option<&ResolvedRoot>,
        control: &ControlId,
        keywords: &[String],
    ) -> FileEvidence {
        match root {
            Some(root) => FileEvidence::from_ranked(self.rank_root(root.path(), control, keywords)),
            None => FileEvidence::empty(),
        }
    }

    /// Evidence for a control from the test and gold roots.
    pub fn summarize(
        &self,
        control: &ControlId,
        description: &str,
        test_root: Option<&ResolvedRoot>,
        gold_root: Option<&ResolvedRoot>,
    ) -> EvidenceSummary {
        let keywords = self.keywords(control, description);
        let test = self.file_evidence(test_root, control, &keywords);
        let gold = self.file_evidence(gold_root, control, &keywords);

        tracing::debug!(
            control_id = %control,
            keywords = keywords.len(),
            test_files = test.files().len(),
            gold_files = gold.files().len(),
            test_top = test.top_snippet_name(),
            gold_top = gold.top_snippet_name(),
            "evidence summarized"
        );

        EvidenceSummary {
            control_id: control.clone(),
            description: description.to_string(),
            test,
            gold,
        }
    }
}

impl Default for EvidenceBuilder {
    fn default() -> Self {
        Self::new(EvidenceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::resolve_root;

    #[test]
    fn from_ranked_enforces_invariants() {
        let ev = FileEvidence::from_ranked(vec![
            PathBuf::from("/t/config/policy.ps1"),
            PathBuf::from("/t/readme.md"),
        ]);
        assert!(ev.has());
        assert_eq!(ev.top_snippet_name(), "policy.ps1");
        assert_eq!(ev.files().len(), 2);

        let none = FileEvidence::from_ranked(Vec::new());
        assert_eq!(none, FileEvidence::empty());
        assert!(!none.has());
        assert_eq!(none.top_snippet_name(), "");

        let nameless = FileEvidence::from_ranked(vec![PathBuf::from("/"), PathBuf::from("/t/..")]);
        assert_eq!(nameless, FileEvidence::empty());
    }

    #[test]
    fn absent_roots_give_empty_evidence() {
        let builder = EvidenceBuilder::default();
        let id = ControlId::new("ISM-1955").unwrap();
        let summary = builder.summarize(&id, "password age 30 days", None, None);
        assert_eq!(summary.test, FileEvidence::empty());
        assert_eq!(summary.gold, FileEvidence::empty());
    }

    #[test]
    fn top_n_truncates() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(dir.path().join(format!("f{i}.txt")), "x").unwrap();
        }
        let builder = EvidenceBuilder::new(EvidenceConfig {
            top_n: 3,
            ..EvidenceConfig::default()
        });
        let root = resolve_root(Some(dir.path())).unwrap();
        let id = ControlId::new("ISM-0001").unwrap();
        let summary = builder.summarize(&id, "", Some(&root), None);
        assert_eq!(summary.test.files().len(), 3);
        assert_eq!(summary.test.top_snippet_name(), "f0.txt");
        assert!(!summary.gold.has());
    }

    #[test]
    fn summary_serializes_with_both_sides() {
        let summary = EvidenceSummary {
            control_id: ControlId::new("ism-1955").unwrap(),
            description: "d".into(),
            test: FileEvidence::from_ranked(vec![PathBuf::from("/t/a.reg")]),
            gold: FileEvidence::empty(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["control_id"], "ISM-1955");
        assert_eq!(json["test"]["has"], true);
        assert_eq!(json["test"]["top_snippet_name"], "a.reg");
        assert_eq!(json["gold"]["files"].as_array().unwrap().len(), 0);
    }
}
