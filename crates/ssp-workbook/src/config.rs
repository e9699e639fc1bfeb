//! Workbook settings as read from configuration.

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnOverridePolicy, HeaderHints};
use crate::rows::default_truthy_values;

/// Default worksheet title.
pub const DEFAULT_SHEET: &str = "March 2025";

/// How a workbook is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    /// Header substrings per logical column.
    pub header_hints: HeaderHints,
    /// Forced and fallback column positions.
    pub overrides: ColumnOverridePolicy,
    /// Worksheet to use when present; otherwise the first sheet.
    pub preferred_sheet: Option<String>,
    /// Applicability values treated as "applies" (case-insensitive).
    pub truthy_values: Vec<String>,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            header_hints: HeaderHints::default(),
            overrides: ColumnOverridePolicy::default(),
            preferred_sheet: Some(DEFAULT_SHEET.to_string()),
            truthy_values: default_truthy_values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg: WorkbookConfig = serde_yaml::from_str(
            "preferred_sheet: Controls\nheader_hints:\n  implementation_status: [verdict]\n",
        )
        .unwrap();
        assert_eq!(cfg.preferred_sheet.as_deref(), Some("Controls"));
        assert_eq!(cfg.header_hints.implementation_status, vec!["verdict"]);
        assert_eq!(cfg.header_hints.identifier, HeaderHints::default().identifier);
        assert_eq!(cfg.overrides.forced.get(&Column::Applicability), Some(&9));
        assert_eq!(cfg.truthy_values.len(), 4);
    }
}
