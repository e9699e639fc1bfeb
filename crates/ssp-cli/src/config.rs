//! # Assessment Configuration
//!
//! One YAML document configures a run. Every section is optional and
//! defaults to the built-in tables:
//!
//! ```yaml
//! evidence:
//!   top_n: 20
//!   preferred_subdirs: [config, policies]
//! validators:
//!   - control_id: ISM-1955
//!     setting: MaximumPasswordAge
//!     subject: Password age
//! owners:
//!   fallback: Owner
//! workbook:
//!   preferred_sheet: March 2025
//! pipeline:
//!   applicability_class: P
//!   max_rows: 50
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ssp_engine::{default_validator_specs, MaxAgeSpec, OwnerTable};
use ssp_evidence::EvidenceConfig;
use ssp_workbook::WorkbookConfig;

/// Row selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Catalogue applicability tag a control must carry.
    pub applicability_class: String,
    /// Stop after this many selected rows.
    pub max_rows: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            applicability_class: "P".into(),
            max_rows: None,
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessConfig {
    pub evidence: EvidenceConfig,
    pub validators: Vec<MaxAgeSpec>,
    pub owners: OwnerTable,
    pub workbook: WorkbookConfig,
    pub pipeline: PipelineConfig,
}

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            evidence: EvidenceConfig::default(),
            validators: default_validator_specs(),
            owners: OwnerTable::default(),
            workbook: WorkbookConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AssessConfig {
    /// Load from a YAML file, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file: {}", path.display()))?;
                serde_yaml::from_str::<Self>(&text)
                    .with_context(|| format!("failed to parse config YAML: {}", path.display()))?
            }
            None => Self::default(),
        };
        config.normalized()
    }

    /// Validate and normalize nested sections.
    pub fn normalized(mut self) -> Result<Self> {
        self.evidence = self
            .evidence
            .normalized()
            .context("invalid evidence section")?;
        self.pipeline.applicability_class = self.pipeline.applicability_class.trim().to_uppercase();
        if self.pipeline.max_rows == Some(0) {
            tracing::warn!("pipeline.max_rows is 0; no rows will be assessed");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let cfg = AssessConfig::load(None).unwrap();
        assert_eq!(cfg.pipeline.applicability_class, "P");
        assert_eq!(cfg.validators.len(), 1);
        assert_eq!(cfg.evidence.top_n, 20);
    }

    #[test]
    fn partial_file_overrides_only_named_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssp.yaml");
        std::fs::write(
            &path,
            "pipeline:\n  applicability_class: ' s '\n  max_rows: 5\nvalidators: []\nevidence:\n  extension_weights:\n    PS1: 100\n",
        )
        .unwrap();
        let cfg = AssessConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.pipeline.applicability_class, "S");
        assert_eq!(cfg.pipeline.max_rows, Some(5));
        assert!(cfg.validators.is_empty());
        assert_eq!(cfg.evidence.weight_of(".ps1"), Some(100));
        assert_eq!(cfg.owners, OwnerTable::default());
    }

    #[test]
    fn invalid_evidence_section_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "evidence:\n  top_n: 0\n").unwrap();
        let err = AssessConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("top_n"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AssessConfig::load(Some(Path::new("/nonexistent/ssp.yaml"))).is_err());
    }
}
