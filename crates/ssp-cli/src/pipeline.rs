//! # Assessment Pipeline
//!
//! Fills an SSP workbook, one applicable row at a time:
//!
//! 1. open the workbook, map columns, read rows;
//! 2. keep rows with an identifier that are marked applicable and, when a
//!    catalogue is given, listed with the configured applicability class;
//!    then apply the row limit;
//! 3. resolve the test and gold roots once;
//! 4. per row: build evidence, decide, classify and route an owner, let an
//!    assessment agent speak for controls without a validator, substitute
//!    remediation text for an undecided validator, append an evidence hint;
//! 5. write the three outcome cells; after the last row, save once.
//!
//! The run is synchronous. A row never aborts the run: unreadable files
//! degrade to empty evidence. Only workbook open, column mapping and the
//! final save can fail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use ssp_core::{Capability, ControlId, Status};
use ssp_engine::{
    consult, AssessmentAgent, AssessmentTask, CapabilityClassifier, DecisionBasis,
    DecisionEngine, KeywordClassifier, OwnerRouter, ValidatorRegistry,
};
use ssp_evidence::{resolve_root, EvidenceBuilder, EvidenceSummary, ResolvedRoot};
use ssp_workbook::{map_columns, read_rows, CellRef, RowWriter, SpreadsheetRow, Workbook};

use crate::catalogue::Catalogue;
use crate::config::AssessConfig;

/// The exposed result for one row.
#[derive(Debug, Clone, Serialize)]
pub struct RowOutcome {
    /// 1-based sheet row.
    pub row_index: u32,
    /// Normalized identifier of the row's control.
    pub control_id: ControlId,
    /// Responsible entity written.
    pub owner: String,
    /// Status written.
    pub status: Status,
    /// Comment written, including any evidence hint.
    pub comment: String,
    /// Rule that produced the engine decision.
    pub basis: DecisionBasis,
    /// Whether an assessment agent's reply replaced the engine decision.
    pub agent_override: bool,
    /// Ranked evidence the decision was made from.
    pub evidence: EvidenceSummary,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Rows whose three outcome cells were written.
    pub rows_written: usize,
    /// Title of the worksheet assessed.
    pub sheet: String,
    /// Path of the saved workbook.
    pub output: PathBuf,
    /// Every cell written, in write order.
    pub cells: Vec<CellRef>,
    /// Per-row outcomes, in sheet order.
    pub outcomes: Vec<RowOutcome>,
}

/// Inputs of one run beyond configuration.
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    /// Workbook to read; never written.
    pub workbook: PathBuf,
    /// Requested output path; the saved name gains a timestamp.
    pub output: PathBuf,
    /// Test system directory or archive.
    pub test_system: Option<PathBuf>,
    /// Gold blueprint directory or archive.
    pub gold: Option<PathBuf>,
    /// When present, only listed controls of the configured class are assessed.
    pub catalogue: Option<Catalogue>,
}

/// Decides individual controls with fixed tables.
pub struct Assessor {
    evidence: EvidenceBuilder,
    engine: DecisionEngine,
    router: OwnerRouter,
    classifier: Box<dyn CapabilityClassifier>,
    agent: Option<Box<dyn AssessmentAgent>>,
}

impl std::fmt::Debug for Assessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assessor")
            .field("validators", &self.engine.registry().len())
            .field("agent", &self.agent.is_some())
            .finish_non_exhaustive()
    }
}

impl Assessor {
    /// Build from configuration with the keyword classifier and no agent.
    pub fn from_config(config: &AssessConfig) -> Result<Self> {
        let registry =
            ValidatorRegistry::from_specs(&config.validators, config.evidence.max_read_bytes)
                .context("invalid validator configuration")?;
        Ok(Self {
            evidence: EvidenceBuilder::new(config.evidence.clone()),
            engine: DecisionEngine::new(registry),
            router: OwnerRouter::new(config.owners.clone()),
            classifier: Box::new(KeywordClassifier::default()),
            agent: None,
        })
    }

    /// Replace the capability classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn CapabilityClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Consult an assessment agent for controls without a validator.
    pub fn with_agent(mut self, agent: Box<dyn AssessmentAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Evidence for a control.
    pub fn evidence(
        &self,
        control: &ControlId,
        description: &str,
        test_root: Option<&ResolvedRoot>,
        gold_root: Option<&ResolvedRoot>,
    ) -> EvidenceSummary {
        self.evidence
            .summarize(control, description, test_root, gold_root)
    }

    /// Full outcome for one control.
    pub fn assess(
        &self,
        row_index: u32,
        control: &ControlId,
        description: &str,
        test_root: Option<&ResolvedRoot>,
        gold_root: Option<&ResolvedRoot>,
    ) -> RowOutcome {
        let evidence = self.evidence(control, description, test_root, gold_root);
        let outcome = self.engine.decide(&evidence);

        let capability =
            Capability::from_selector_reply(&self.classifier.classify(control, description));
        let owner = self.router.owner_for(capability).to_string();

        let mut decision = outcome.decision;
        let mut agent_override = false;
        if !outcome.basis.has_validator() {
            if let Some(agent) = &self.agent {
                let task = AssessmentTask {
                    control_id: control.clone(),
                    description: description.to_string(),
                    capability,
                };
                if let Some(reply) = consult(agent.as_ref(), &task) {
                    decision = reply;
                    agent_override = true;
                }
            }
        }

        if outcome.basis == DecisionBasis::ValidatorUndecided && decision.comment.is_empty() {
            if let Some(text) = self.engine.remediation(control, description) {
                decision.comment = text;
            }
        }

        let comment = format!("{}{}", decision.comment, evidence_hint(&evidence))
            .trim()
            .to_string();

        tracing::info!(
            row = row_index,
            control_id = %control,
            owner = %owner,
            status = %decision.status,
            "row assessed"
        );

        RowOutcome {
            row_index,
            control_id: control.clone(),
            owner,
            status: decision.status,
            comment,
            basis: outcome.basis,
            agent_override,
            evidence,
        }
    }
}

/// ` [test: <file>]`, else ` [gold-only: <file>]`, else nothing.
pub fn evidence_hint(evidence: &EvidenceSummary) -> String {
    if evidence.test.has() {
        format!(" [test: {}]", evidence.test.top_snippet_name())
    } else if evidence.gold.has() {
        format!(" [gold-only: {}]", evidence.gold.top_snippet_name())
    } else {
        String::new()
    }
}

/// Rows to assess, in sheet order.
pub fn select_rows<'a>(
    rows: &'a [SpreadsheetRow],
    catalogue: Option<&Catalogue>,
    applicability_class: &str,
    max_rows: Option<usize>,
) -> Vec<(&'a SpreadsheetRow, ControlId)> {
    rows.iter()
        .filter(|row| row.is_applicable)
        .filter_map(|row| row.control_id().map(|id| (row, id)))
        .filter(|(_, id)| catalogue.map_or(true, |c| c.applies(id, applicability_class)))
        .take(max_rows.unwrap_or(usize::MAX))
        .collect()
}

/// Run the whole pipeline.
pub fn run(config: &AssessConfig, assessor: &Assessor, inputs: &RunInputs) -> Result<RunReport> {
    let mut workbook = Workbook::open(&inputs.workbook, config.workbook.preferred_sheet.as_deref())
        .with_context(|| format!("failed to open workbook: {}", inputs.workbook.display()))?;
    let sheet_name = workbook.sheet_name().to_string();

    let (columns, rows) = {
        let sheet = workbook.sheet()?;
        let columns = map_columns(sheet, &config.workbook.header_hints, &config.workbook.overrides)
            .with_context(|| format!("failed to map columns of sheet '{sheet_name}'"))?;
        let rows = read_rows(sheet, &columns, &config.workbook.truthy_values);
        (columns, rows)
    };

    let selected = select_rows(
        &rows,
        inputs.catalogue.as_ref(),
        &config.pipeline.applicability_class,
        config.pipeline.max_rows,
    );
    tracing::info!(
        sheet = %sheet_name,
        rows = rows.len(),
        selected = selected.len(),
        "rows selected"
    );

    let test_root = resolve_root(inputs.test_system.as_deref());
    let gold_root = resolve_root(inputs.gold.as_deref());
    if inputs.test_system.is_some() && test_root.is_none() {
        tracing::warn!("test system path did not resolve; every control lacks test evidence");
    }

    let mut outcomes = Vec::with_capacity(selected.len());
    let mut cells = Vec::with_capacity(selected.len() * 3);
    {
        let sheet = workbook.sheet_mut()?;
        let mut writer = RowWriter::new(sheet, columns);
        for (row, id) in selected {
            let outcome = assessor.assess(
                row.row_index,
                &id,
                &row.description,
                test_root.as_ref(),
                gold_root.as_ref(),
            );
            cells.extend(writer.write(
                row.row_index,
                &outcome.owner,
                outcome.status,
                &outcome.comment,
            ));
            outcomes.push(outcome);
        }
    }

    let output = workbook
        .save_as(&inputs.output)
        .with_context(|| format!("failed to save workbook near {}", inputs.output.display()))?;

    Ok(RunReport {
        rows_written: outcomes.len(),
        sheet: sheet_name,
        output,
        cells,
        outcomes,
    })
}
