//! # Evidence Subcommand
//!
//! Audit view of a single control: the ranked evidence from both roots and
//! the decision the engine would write.
//!
//! ```bash
//! ssp evidence --control ISM-1955 --description "... past 30 days" --test-system ./system
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ssp_core::{ControlId, Status};
use ssp_engine::DecisionBasis;
use ssp_evidence::{resolve_root, EvidenceSummary, ResolvedRoot};

use crate::config::AssessConfig;
use crate::pipeline::Assessor;
use crate::resolve_path;

/// Arguments for the `ssp evidence` subcommand.
#[derive(Args, Debug)]
pub struct EvidenceArgs {
    /// Control identifier (case-insensitive).
    #[arg(long)]
    pub control: String,

    /// Control description used for keywords and thresholds.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Test system directory or .zip archive.
    #[arg(long, value_name = "PATH")]
    pub test_system: Option<PathBuf>,

    /// Gold blueprint directory or .zip archive.
    #[arg(long, value_name = "PATH")]
    pub gold: Option<PathBuf>,
}

/// Audit view of one control.
#[derive(Debug, Serialize)]
pub struct EvidenceReport {
    /// Search terms derived from the identifier and description.
    pub keywords: Vec<String>,
    /// Owner the control routes to.
    pub owner: String,
    /// Status that would be written.
    pub status: Status,
    /// Comment that would be written.
    pub comment: String,
    /// Rule that produced the decision.
    pub basis: DecisionBasis,
    /// Ranked evidence from both roots.
    pub evidence: EvidenceSummary,
}

/// Assess a single control outside any workbook.
pub fn evidence_report(
    config: &AssessConfig,
    control: &ControlId,
    description: &str,
    test_root: Option<&ResolvedRoot>,
    gold_root: Option<&ResolvedRoot>,
) -> Result<EvidenceReport> {
    let assessor = Assessor::from_config(config)?;
    let outcome = assessor.assess(0, control, description, test_root, gold_root);
    Ok(EvidenceReport {
        keywords: config.evidence.hints.keywords_for(control, description),
        owner: outcome.owner,
        status: outcome.status,
        comment: outcome.comment,
        basis: outcome.basis,
        evidence: outcome.evidence,
    })
}

/// Execute the evidence subcommand.
pub fn run_evidence(args: &EvidenceArgs, config: &AssessConfig, base: &Path) -> Result<u8> {
    let control = ControlId::new(&args.control)?;
    let test_root = resolve_root(args.test_system.as_ref().map(|p| resolve_path(p, base)).as_deref());
    let gold_root = resolve_root(args.gold.as_ref().map(|p| resolve_path(p, base)).as_deref());

    let report = evidence_report(
        config,
        &control,
        &args.description,
        test_root.as_ref(),
        gold_root.as_ref(),
    )?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}
