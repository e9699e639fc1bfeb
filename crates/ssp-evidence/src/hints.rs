//! # Keyword Hints
//!
//! Derives the search terms used to score candidate files for a control.
//! Two sources are unioned, in this order:
//!
//! 1. a per-control table of known synonyms (setting names, registry paths);
//! 2. description triggers: when a marker substring occurs in the
//!    lower-cased description, the trigger's terms are added.
//!
//! The union keeps first-seen order and drops exact duplicates. There is no
//! language understanding here: substring triggers only.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use ssp_core::ControlId;

/// Adds `terms` when any of `markers` occurs in a control description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTrigger {
    /// Substrings searched for in the lower-cased description.
    pub markers: Vec<String>,
    /// Search terms contributed when a marker matches.
    pub terms: Vec<String>,
}

impl DescriptionTrigger {
    fn new(markers: &[&str], terms: &[&str]) -> Self {
        Self {
            markers: markers.iter().map(|s| s.to_string()).collect(),
            terms: terms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fires_on(&self, lowered_description: &str) -> bool {
        self.markers
            .iter()
            .any(|m| !m.is_empty() && lowered_description.contains(&m.to_lowercase()))
    }
}

/// Read-only keyword tables, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintTable {
    /// Known synonyms per control.
    pub controls: BTreeMap<ControlId, Vec<String>>,
    /// Description topic triggers, evaluated in order.
    pub triggers: Vec<DescriptionTrigger>,
}

impl Default for HintTable {
    fn default() -> Self {
        let mut controls = BTreeMap::new();
        if let Ok(id) = ControlId::new("ISM-1955") {
            controls.insert(
                id,
                [
                    "MaximumPasswordAge",
                    "password age",
                    "password expiry",
                    "Netlogon\\Parameters",
                    "Netlogon/Parameters",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            );
        }
        Self {
            controls,
            triggers: vec![
                DescriptionTrigger::new(
                    &["password"],
                    &[
                        "password",
                        "password age",
                        "password expiry",
                        "maximum password age",
                        "MaximumPasswordAge",
                    ],
                ),
                DescriptionTrigger::new(
                    &["rotate", "rotation", "changed", "change"],
                    &["rotate", "rotation", "changed", "change"],
                ),
                DescriptionTrigger::new(&["30", "thirty"], &["30", "thirty"]),
            ],
        }
    }
}

impl HintTable {
    /// An empty table: no per-control synonyms, no triggers.
    pub fn empty() -> Self {
        Self {
            controls: BTreeMap::new(),
            triggers: Vec::new(),
        }
    }

    /// Ordered, deduplicated search terms for a control.
    pub fn keywords_for(&self, control: &ControlId, description: &str) -> Vec<String> {
        let lowered = description.to_lowercase();
        let table_terms = self.controls.get(control).into_iter().flatten();
        let trigger_terms = self
            .triggers
            .iter()
            .filter(|t| t.fires_on(&lowered))
            .flat_map(|t| t.terms.iter());

        let mut seen = HashSet::new();
        table_terms
            .chain(trigger_terms)
            .filter(|term| !term.is_empty())
            .filter(|term| seen.insert(term.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ControlId {
        ControlId::new(s).unwrap()
    }

    #[test]
    fn table_terms_come_first_then_description_terms() {
        let hints = HintTable::default();
        let kws = hints.keywords_for(
            &id("ism-1955"),
            "Credentials are changed if not changed in the past 30 days.",
        );
        assert_eq!(
            kws,
            vec![
                "MaximumPasswordAge",
                "password age",
                "password expiry",
                "Netlogon\\Parameters",
                "Netlogon/Parameters",
                "rotate",
                "rotation",
                "changed",
                "change",
                "30",
                "thirty",
            ]
        );
    }

    #[test]
    fn duplicates_are_dropped_preserving_first_position() {
        let hints = HintTable::default();
        let kws = hints.keywords_for(&id("ISM-1955"), "Password age is limited");
        let count = kws.iter().filter(|k| *k == "password age").count();
        assert_eq!(count, 1);
        assert_eq!(kws[0], "MaximumPasswordAge");
        // "password" only arrives via the trigger, after the table terms.
        let pos = kws.iter().position(|k| k == "password").unwrap();
        assert_eq!(pos, 5);
    }

    #[test]
    fn unknown_control_with_empty_description_has_no_terms() {
        let hints = HintTable::default();
        assert!(hints.keywords_for(&id("ISM-0001"), "").is_empty());
    }

    #[test]
    fn markers_are_case_insensitive() {
        let hints = HintTable::default();
        let kws = hints.keywords_for(&id("ISM-0001"), "ROTATION of keys");
        assert_eq!(kws, vec!["rotate", "rotation", "changed", "change"]);
    }

    #[test]
    fn keyword_derivation_is_deterministic() {
        let hints = HintTable::default();
        let a = hints.keywords_for(&id("ISM-1955"), "password change every 30 days");
        let b = hints.keywords_for(&id("ISM-1955"), "password change every 30 days");
        assert_eq!(a, b);
    }

    #[test]
    fn substitute_table_is_used_verbatim() {
        let mut hints = HintTable::empty();
        hints
            .controls
            .insert(id("ISM-0421"), vec!["MinimumPasswordLength".into()]);
        assert_eq!(
            hints.keywords_for(&id("ism-0421"), "password length"),
            vec!["MinimumPasswordLength"]
        );
    }
}
