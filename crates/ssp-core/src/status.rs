//! # Implementation Status & Decisions
//!
//! [`Status`] is the closed set of verdicts written to the
//! "Implementation Status" column. [`Decision`] pairs a status with the
//! human-readable justification written to "Implementation Comments".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Verdict for a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The test system satisfies the control.
    Comply,
    /// The test system satisfies part of the control.
    Partial,
    /// The test system does not satisfy the control, or evidence is missing.
    Gap,
}

impl Status {
    /// All statuses in canonical order.
    pub fn all() -> &'static [Status] {
        &[Self::Comply, Self::Partial, Self::Gap]
    }

    /// Spreadsheet spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comply => "Comply",
            Self::Partial => "Partial",
            Self::Gap => "Gap",
        }
    }

    /// Interpret the leading token of a free-text reply line.
    ///
    /// The first whitespace-separated token is stripped of surrounding
    /// `:` and `-` characters and compared case-insensitively by prefix, so
    /// `"Gap: no lockout policy"` and `"comply - baseline applied"` both
    /// parse. Returns `None` when the line does not start with a status.
    pub fn parse_leading(line: &str) -> Option<Self> {
        let head = line.split_whitespace().next()?;
        let head = head
            .trim_matches(|c: char| c == ':' || c == '-')
            .to_ascii_lowercase();
        if head.starts_with("comply") {
            Some(Self::Comply)
        } else if head.starts_with("partial") {
            Some(Self::Partial)
        } else if head.starts_with("gap") {
            Some(Self::Gap)
        } else {
            None
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comply" => Ok(Self::Comply),
            "partial" => Ok(Self::Partial),
            "gap" => Ok(Self::Gap),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// A status together with its justification.
///
/// The comment is empty only when no evidence was found and no validator
/// produced a value; callers substitute remediation text in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The verdict.
    pub status: Status,
    /// Human-readable justification (may be empty, see above).
    pub comment: String,
}

impl Decision {
    /// A `Comply` decision with a justification.
    pub fn comply(comment: impl Into<String>) -> Self {
        Self {
            status: Status::Comply,
            comment: comment.into(),
        }
    }

    /// A `Gap` decision with a justification.
    pub fn gap(comment: impl Into<String>) -> Self {
        Self {
            status: Status::Gap,
            comment: comment.into(),
        }
    }

    /// A `Gap` with no comment: explicit evidence was required and not found.
    pub fn gap_without_comment() -> Self {
        Self::gap(String::new())
    }

    /// Interpret a free-text reply whose leading token is a status.
    ///
    /// The whole trimmed line becomes the comment.
    pub fn from_reply(line: &str) -> Option<Self> {
        let status = Status::parse_leading(line)?;
        Some(Self {
            status,
            comment: line.trim().to_string(),
        })
    }
}
