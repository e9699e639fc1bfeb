//! # Control Catalogue
//!
//! The catalogue lists controls with the classification levels they apply
//! to. It is produced by an external parser; this module only loads its
//! YAML or JSON output:
//!
//! ```yaml
//! - id: ISM-1955
//!   applicability: [NC, OS, P, S, TS]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use ssp_core::{ControlId, ControlRecord};

/// Controls keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    records: BTreeMap<ControlId, ControlRecord>,
}

impl Catalogue {
    /// Build from records; a later duplicate replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = ControlRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    /// Load a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalogue: {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let records: Vec<ControlRecord> = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse catalogue JSON: {}", path.display()))?
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse catalogue YAML: {}", path.display()))?
        };
        let catalogue = Self::from_records(records);
        tracing::info!(path = %path.display(), controls = catalogue.len(), "catalogue loaded");
        Ok(catalogue)
    }

    /// Look up a control.
    pub fn get(&self, id: &ControlId) -> Option<&ControlRecord> {
        self.records.get(id)
    }

    /// Whether a control is listed and applies to `class`.
    pub fn applies(&self, id: &ControlId, class: &str) -> bool {
        self.get(id).is_some_and(|r| r.applies_to(class))
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
