//! # Decision Engine
//!
//! Turns an [`EvidenceSummary`] into a [`Decision`] from TEST evidence
//! only. Rules, first match wins:
//!
//! 1. validator registered and decided: its verdict, verbatim;
//! 2. validator registered but undecided: `Gap` with an empty comment;
//! 3. no validator, at least one test file: `Comply` naming the top file;
//! 4. otherwise: `Gap` with an empty comment.
//!
//! Gold-blueprint evidence never changes a status.

use serde::Serialize;

use ssp_core::{ControlId, Decision};
use ssp_evidence::EvidenceSummary;

use crate::validator::{ValidatorRegistry, Verdict};

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// A validator found an explicit value.
    Validator,
    /// A validator exists but found no explicit value.
    ValidatorUndecided,
    /// No validator; test evidence exists.
    TestEvidence,
    /// No validator and no test evidence.
    NoEvidence,
}

impl DecisionBasis {
    /// Whether a validator is registered for the control.
    pub fn has_validator(&self) -> bool {
        matches!(self, Self::Validator | Self::ValidatorUndecided)
    }
}

/// A decision and the rule behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionOutcome {
    /// The decision.
    pub decision: Decision,
    /// The rule that fired.
    pub basis: DecisionBasis,
}

/// Applies the decision rules with a fixed validator registry.
#[derive(Debug, Default)]
pub struct DecisionEngine {
    registry: ValidatorRegistry,
}

impl DecisionEngine {
    /// Create an engine over a registry.
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// The validator registry.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Decide a control from its evidence.
    pub fn decide(&self, evidence: &EvidenceSummary) -> DecisionOutcome {
        let control = &evidence.control_id;
        let files = evidence.test.files();

        let outcome = match self.registry.get(control) {
            Some(validator) => match validator.validate(&evidence.description, files) {
                Verdict::Decided(decision) => DecisionOutcome {
                    decision,
                    basis: DecisionBasis::Validator,
                },
                Verdict::Undecided => DecisionOutcome {
                    decision: Decision::gap_without_comment(),
                    basis: DecisionBasis::ValidatorUndecided,
                },
            },
            None if evidence.test.has() => DecisionOutcome {
                decision: Decision::comply(format!(
                    "Evidence present in test: {}",
                    evidence.test.top_snippet_name()
                )),
                basis: DecisionBasis::TestEvidence,
            },
            None => DecisionOutcome {
                decision: Decision::gap_without_comment(),
                basis: DecisionBasis::NoEvidence,
            },
        };

        tracing::debug!(
            control_id = %control,
            status = %outcome.decision.status,
            basis = ?outcome.basis,
            "control decided"
        );
        outcome
    }

    /// Remediation text for a control whose validator was undecided.
    pub fn remediation(&self, control: &ControlId, description: &str) -> Option<String> {
        self.registry.get(control)?.remediation(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_validator_specs;
    use ssp_core::Status;
    use ssp_evidence::{FileEvidence, DEFAULT_MAX_READ_BYTES};
    use std::path::PathBuf;

    fn engine() -> DecisionEngine {
        DecisionEngine::new(
            ValidatorRegistry::from_specs(&default_validator_specs(), DEFAULT_MAX_READ_BYTES)
                .unwrap(),
        )
    }

    fn summary(id: &str, test: Vec<PathBuf>, gold: Vec<PathBuf>) -> EvidenceSummary {
        EvidenceSummary {
            control_id: ControlId::new(id).unwrap(),
            description: "changed every 30 days".into(),
            test: FileEvidence::from_ranked(test),
            gold: FileEvidence::from_ranked(gold),
        }
    }

    #[test]
    fn generic_control_with_test_file_complies() {
        let out = engine().decide(&summary(
            "ISM-0421",
            vec![PathBuf::from("/t/config/baseline.ps1")],
            vec![],
        ));
        assert_eq!(out.basis, DecisionBasis::TestEvidence);
        assert_eq!(
            out.decision,
            Decision::comply("Evidence present in test: baseline.ps1")
        );
    }

    #[test]
    fn generic_control_without_test_files_is_gap_even_with_gold() {
        let out = engine().decide(&summary(
            "ISM-0421",
            vec![],
            vec![PathBuf::from("/g/baseline.ps1")],
        ));
        assert_eq!(out.basis, DecisionBasis::NoEvidence);
        assert_eq!(out.decision.status, Status::Gap);
        assert!(out.decision.comment.is_empty());
    }

    #[test]
    fn undecided_validator_is_gap_with_remediation_available() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("readme.md");
        std::fs::write(&doc, "nothing explicit").unwrap();
        let e = engine();
        let out = e.decide(&summary("ism-1955", vec![doc], vec![]));
        assert_eq!(out.basis, DecisionBasis::ValidatorUndecided);
        assert!(out.basis.has_validator());
        assert_eq!(out.decision, Decision::gap_without_comment());
        assert!(e
            .remediation(&ControlId::new("ISM-1955").unwrap(), "30 days")
            .unwrap()
            .contains("MaximumPasswordAge"));
        assert!(e
            .remediation(&ControlId::new("ISM-0421").unwrap(), "")
            .is_none());
    }

    #[test]
    fn empty_registry_takes_generic_path_for_every_control() {
        let out = DecisionEngine::default().decide(&summary(
            "ISM-1955",
            vec![PathBuf::from("/t/a.txt")],
            vec![],
        ));
        assert_eq!(out.basis, DecisionBasis::TestEvidence);
    }
}
