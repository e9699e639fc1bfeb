//! # Control Identity
//!
//! A control is a single named compliance requirement from a catalogue,
//! e.g. `ISM-1955`. Catalogue references are written inconsistently across
//! spreadsheets and documents (`ism-1955`, ` ISM-1955 `), so [`ControlId`]
//! normalizes at construction and every comparison is case-insensitive.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Opaque, upper-cased control identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlId(String);

impl ControlId {
    /// Create a control identifier, trimming whitespace and upper-casing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyControlId`] if nothing remains after
    /// trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyControlId);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The normalized (upper-case) identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw string.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim().to_uppercase()
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ControlId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ControlId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ControlId> for String {
    fn from(id: ControlId) -> Self {
        id.0
    }
}

/// A catalogue entry: a control and the classification levels it applies to.
///
/// Produced by the external catalogue parser (for example
/// `ISM-1955` with applicability `[NC, OS, P, S, TS]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRecord {
    /// The control identifier.
    pub id: ControlId,
    /// Applicability tags, as written in the catalogue.
    #[serde(default)]
    pub applicability: Vec<String>,
}

impl ControlRecord {
    /// Whether the control applies to the given classification tag
    /// (case-insensitive).
    pub fn applies_to(&self, class: &str) -> bool {
        let class = class.trim();
        self.applicability
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(class))
    }
}
