//! # Max-Age Validator
//!
//! Decides controls of the shape "setting X, in days, must not exceed N".
//! The shipped registration is `ISM-1955` / `MaximumPasswordAge` with a
//! 30-day default.
//!
//! ## Threshold
//!
//! The first `<digits> day(s)` in the control description, else the
//! configured default.
//!
//! ## Value Extraction
//!
//! Files whose content names the setting are searched before all others;
//! within each group the ranked order is kept. For each file the patterns
//! below are tried in order and the first numeric capture wins:
//!
//! | Pattern | Example |
//! |---------|---------|
//! | assignment | `MaximumPasswordAge = 45`, `MaximumPasswordAge: 45` |
//! | registry file dword | `"MaximumPasswordAge"=dword:0000002d` |
//! | property set | `-Name MaximumPasswordAge ... -Value 45` |
//! | registry DWORD listing | `MaximumPasswordAge    REG_DWORD    0x2d` |
//! | proximity | `MaximumPasswordAge (days) 45` |
//! | alias proximity | `max password age of 45` |
//!
//! Values are decimal, or hexadecimal with a `0x` prefix. Registry file
//! dwords are always hexadecimal. The proximity patterns never take a
//! number glued to a letter or `-`, as in `ISM-1955`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use ssp_core::Decision;
use ssp_evidence::{read_small_text, FileText};

use crate::config::MaxAgeSpec;
use crate::error::EngineError;
use crate::validator::{ControlValidator, Verdict};

fn threshold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)[\s-]*days?").expect("threshold regex must compile"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    /// Decimal, or hexadecimal when prefixed with `0x`.
    Auto,
    Hex,
}

#[derive(Debug)]
struct ValuePattern {
    label: &'static str,
    regex: Regex,
    radix: Radix,
}

/// Threshold comparison for a numeric day-count setting.
#[derive(Debug)]
pub struct MaxAgeValidator {
    name: String,
    setting: String,
    subject: String,
    default_threshold: u64,
    max_read_bytes: u64,
    patterns: Vec<ValuePattern>,
}

impl MaxAgeValidator {
    /// Build a validator and compile its patterns.
    pub fn from_spec(spec: &MaxAgeSpec, max_read_bytes: u64) -> Result<Self, EngineError> {
        let setting = spec.setting.trim();
        if setting.is_empty() {
            return Err(EngineError::InvalidSpec(format!(
                "{}: setting name must not be empty",
                spec.control_id
            )));
        }
        let name = format!("max-age:{setting}");
        let s = regex::escape(setting);
        let num = r"(0x[0-9a-f]+|\d+)\b";
        // Up to 40 characters on one line, not ending in a letter or `-`,
        // so dashed identifiers such as `ISM-1955` are never read as values.
        let gap = r"(?:[^0-9\r\n]{0,39}?[^0-9a-z\r\n-])?";
        let loose = r"(0x[0-9a-f]+|\d{1,4})\b";

        let mut sources: Vec<(&'static str, String, Radix)> = vec![
            (
                "assignment",
                format!(r#"(?i)\b{s}\b["']?\s*[:=]\s*["']?{num}"#),
                Radix::Auto,
            ),
            (
                "registry file dword",
                format!(r#"(?i)"?\b{s}\b"?\s*=\s*dword:([0-9a-f]{{1,8}})\b"#),
                Radix::Hex,
            ),
            (
                "property set",
                format!(r#"(?is)-Name\s+["']?{s}\b["']?.{{0,200}}?-Value\s+["']?{num}"#),
                Radix::Auto,
            ),
            (
                "registry DWORD listing",
                format!(r"(?is)\b{s}\b.{{0,80}}?REG_DWORD.{{0,20}}?\b{num}"),
                Radix::Auto,
            ),
            (
                "proximity",
                format!(r"(?i)\b{s}\b{gap}{loose}"),
                Radix::Auto,
            ),
        ];
        for alias in spec.aliases.iter().filter(|a| !a.trim().is_empty()) {
            let words: Vec<String> = alias.split_whitespace().map(regex::escape).collect();
            sources.push((
                "alias proximity",
                format!(r"(?i)\b{}\b{gap}{loose}", words.join(r"\s*")),
                Radix::Auto,
            ));
        }

        let patterns = sources
            .into_iter()
            .map(|(label, src, radix)| {
                Regex::new(&src)
                    .map(|regex| ValuePattern { label, regex, radix })
                    .map_err(|source| EngineError::Pattern {
                        validator: name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            setting: setting.to_string(),
            subject: spec.subject.trim().to_string(),
            default_threshold: spec.default_threshold_days,
            max_read_bytes,
            patterns,
        })
    }

    /// Threshold stated in a description, else the default.
    pub fn threshold_for(&self, description: &str) -> u64 {
        threshold_re()
            .captures(description)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(self.default_threshold)
    }

    /// First value found in a file's text.
    pub fn extract_value(&self, text: &str) -> Option<u64> {
        self.patterns.iter().find_map(|p| {
            let raw = p.regex.captures(text)?.get(1)?.as_str();
            let value = parse_number(raw, p.radix)?;
            tracing::trace!(validator = %self.name, pattern = p.label, value, "value matched");
            Some(value)
        })
    }

    fn search_order<'a>(&self, files: &'a [PathBuf]) -> Vec<(&'a Path, FileText)> {
        let needle = self.setting.to_lowercase();
        let (mut first, rest): (Vec<_>, Vec<_>) = files
            .iter()
            .map(|p| (p.as_path(), read_small_text(p, self.max_read_bytes)))
            .filter(|(_, text)| !text.is_empty())
            .partition(|(_, text)| text.to_lowercase().contains(&needle));
        first.extend(rest);
        first
    }
}

fn parse_number(raw: &str, radix: Radix) -> Option<u64> {
    let raw = raw.trim();
    match radix {
        Radix::Hex => u64::from_str_radix(raw, 16).ok(),
        Radix::Auto => match raw.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("0x") => {
                u64::from_str_radix(&raw[2..], 16).ok()
            }
            _ => raw.parse().ok(),
        },
    }
}

impl ControlValidator for MaxAgeValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, description: &str, files: &[PathBuf]) -> Verdict {
        let threshold = self.threshold_for(description);
        for (path, text) in self.search_order(files) {
            let Some(value) = self.extract_value(text.as_str()) else {
                continue;
            };
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(
                validator = %self.name,
                value,
                threshold,
                file = %file,
                "explicit setting found"
            );
            let decision = if value > threshold {
                Decision::gap(format!(
                    "{} {value} days > {threshold} (file: {file})",
                    self.subject
                ))
            } else {
                Decision::comply(format!(
                    "{} {value} days ≤ {threshold} (file: {file})",
                    self.subject
                ))
            };
            return Verdict::Decided(decision);
        }
        tracing::debug!(validator = %self.name, files = files.len(), "no explicit setting found");
        Verdict::Undecided
    }

    fn remediation(&self, description: &str) -> Option<String> {
        Some(format!(
            "Provide explicit {} setting (≤ {} days) in the test system configuration.",
            self.setting,
            self.threshold_for(description)
        ))
    }
}
