//! # Assess Subcommand
//!
//! Runs the assessment pipeline over a workbook and prints the run report.
//!
//! ```bash
//! ssp assess --workbook ssp.xlsx --out filled/ssp.xlsx \
//!     --test-system ./system.zip --gold ./blueprint --catalogue ism.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;

use crate::catalogue::Catalogue;
use crate::config::AssessConfig;
use crate::pipeline::{run, Assessor, RunInputs, RunReport};
use crate::resolve_path;

/// Arguments for the `ssp assess` subcommand.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// SSP workbook to read (never modified).
    #[arg(long, value_name = "XLSX")]
    pub workbook: PathBuf,

    /// Requested output path; the saved file carries a timestamp suffix.
    #[arg(long, value_name = "XLSX")]
    pub out: PathBuf,

    /// Test system directory or .zip archive (authoritative evidence).
    #[arg(long, value_name = "PATH")]
    pub test_system: Option<PathBuf>,

    /// Gold blueprint directory or .zip archive (context only).
    #[arg(long, value_name = "PATH")]
    pub gold: Option<PathBuf>,

    /// Control catalogue (YAML or JSON list of {id, applicability}).
    #[arg(long, value_name = "FILE")]
    pub catalogue: Option<PathBuf>,

    /// Assess at most this many rows.
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Worksheet to use instead of the configured one.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the assess subcommand.
pub fn run_assess(args: &AssessArgs, config: &AssessConfig, base: &Path) -> Result<u8> {
    let workbook = resolve_path(&args.workbook, base);
    if !workbook.is_file() {
        bail!("workbook not found: {}", workbook.display());
    }

    let mut config = config.clone();
    if let Some(sheet) = &args.sheet {
        config.workbook.preferred_sheet = Some(sheet.clone());
    }
    if args.max_rows.is_some() {
        config.pipeline.max_rows = args.max_rows;
    }

    let catalogue = args
        .catalogue
        .as_ref()
        .map(|p| Catalogue::load(&resolve_path(p, base)))
        .transpose()?;

    let inputs = RunInputs {
        workbook,
        output: resolve_path(&args.out, base),
        test_system: args.test_system.as_ref().map(|p| resolve_path(p, base)),
        gold: args.gold.as_ref().map(|p| resolve_path(p, base)),
        catalogue,
    };

    let assessor = Assessor::from_config(&config)?;
    let report = run(&config, &assessor, &inputs)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(0)
}

fn print_report(report: &RunReport) {
    println!("sheet:  {}", report.sheet);
    println!("output: {}", report.output.display());
    println!("rows:   {}", report.rows_written);
    for o in &report.outcomes {
        println!(
            "  row {:>4}  {:<10} {:<7} {:<22} {}",
            o.row_index,
            o.control_id.as_str(),
            o.status.as_str(),
            o.owner,
            o.comment
        );
    }
}
