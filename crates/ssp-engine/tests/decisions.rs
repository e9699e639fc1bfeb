//! # End-to-End Decisions
//!
//! Evidence is built from real file trees and decided with the default
//! validator registry, exercising the same path the assessment pipeline
//! takes for one row. The threshold comparison is checked over generated
//! values.

use std::path::Path;

use proptest::prelude::*;
use ssp_core::{ControlId, Decision, Status};
use ssp_engine::{
    default_validator_specs, ControlValidator, DecisionBasis, DecisionEngine, DecisionOutcome,
    MaxAgeValidator, ValidatorRegistry, Verdict,
};
use ssp_evidence::{resolve_root, EvidenceBuilder, EvidenceConfig, DEFAULT_MAX_READ_BYTES};

const ISM_1955: &str = "Credentials for local administrator accounts and service accounts \
                        are changed if not changed in the past 30 days.";

fn engine(cfg: &EvidenceConfig) -> DecisionEngine {
    DecisionEngine::new(
        ValidatorRegistry::from_specs(&default_validator_specs(), cfg.max_read_bytes).unwrap(),
    )
}

fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, body) in files {
        let p = dir.path().join(rel);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, body).unwrap();
    }
    dir
}

fn decide(control: &str, description: &str, test: Option<&Path>, gold: Option<&Path>) -> ssp_engine::DecisionOutcome {
    let cfg = EvidenceConfig::default();
    let builder = EvidenceBuilder::new(cfg.clone());
    let test = resolve_root(test);
    let gold = resolve_root(gold);
    let id = ControlId::new(control).unwrap();
    let summary = builder.summarize(&id, description, test.as_ref(), gold.as_ref());
    engine(&cfg).decide(&summary)
}

#[test]
fn password_age_above_threshold_is_gap_citing_both_numbers() {
    let test = tree(&[
        ("docs/overview.md", "Password policy overview."),
        ("config/password-policy.ps1", "secedit /configure\nMaximumPasswordAge = 45\n"),
    ]);
    let out = decide("ISM-1955", ISM_1955, Some(test.path()), None);
    assert_eq!(out.basis, DecisionBasis::Validator);
    assert_eq!(out.decision.status, Status::Gap);
    assert!(out.decision.comment.contains("45"));
    assert!(out.decision.comment.contains("30"));
    assert!(out.decision.comment.contains("password-policy.ps1"));
}

#[test]
fn password_age_within_threshold_complies() {
    let test = tree(&[("config/password-policy.ps1", "MaximumPasswordAge = 20")]);
    let out = decide("ism-1955", ISM_1955, Some(test.path()), None);
    assert_eq!(out.decision.status, Status::Comply);
    assert!(out.decision.comment.contains("20"));
}

#[test]
fn gold_value_never_decides_a_validated_control() {
    let test = tree(&[("readme.md", "Passwords are rotated.")]);
    let gold = tree(&[("config/password-policy.ps1", "MaximumPasswordAge = 20")]);
    let out = decide("ISM-1955", ISM_1955, Some(test.path()), Some(gold.path()));
    assert_eq!(out.basis, DecisionBasis::ValidatorUndecided);
    assert_eq!(out.decision.status, Status::Gap);
    assert!(out.decision.comment.is_empty());
}

#[test]
fn generic_control_follows_test_evidence_only() {
    let test = tree(&[("policies/mfa.json", "{\"mfa\": true}")]);
    let out = decide("ISM-1504", "Multi-factor authentication is used.", Some(test.path()), None);
    assert_eq!(out.decision.status, Status::Comply);
    assert_eq!(out.decision.comment, "Evidence present in test: mfa.json");

    let empty = tree(&[]);
    let gold = tree(&[("policies/mfa.json", "{}")]);
    let out = decide("ISM-1504", "", Some(empty.path()), Some(gold.path()));
    assert_eq!(out.decision.status, Status::Gap);
    assert!(out.decision.comment.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn value_above_threshold_is_gap_otherwise_comply(value in 0u64..2000, threshold in 1u64..400) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("secpol.ps1");
        std::fs::write(&file, format!("MaximumPasswordAge = {value}\n")).unwrap();
        let validator =
            MaxAgeValidator::from_spec(&default_validator_specs()[0], DEFAULT_MAX_READ_BYTES).unwrap();

        let verdict = validator.validate(&format!("changed in the past {threshold} days"), &[file]);
        let expected = if value > threshold { Status::Gap } else { Status::Comply };
        match verdict {
            Verdict::Decided(d) => {
                prop_assert_eq!(d.status, expected);
                let value_text = value.to_string();
                prop_assert!(d.comment.contains(&value_text));
            }
            Verdict::Undecided => prop_assert!(false, "no value read for {}", value),
        }
    }
}

#[test]
fn outcome_serializes_with_snake_case_basis() {
    let outcome = DecisionOutcome {
        decision: Decision::gap_without_comment(),
        basis: DecisionBasis::ValidatorUndecided,
    };
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        serde_json::json!({
            "decision": {"status": "Gap", "comment": ""},
            "basis": "validator_undecided"
        })
    );

    let test = tree(&[("policies/mfa.json", "{}")]);
    let out = decide("ISM-1504", "", Some(test.path()), None);
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["basis"], "test_evidence");
    assert_eq!(json["decision"]["status"], "Comply");
}
