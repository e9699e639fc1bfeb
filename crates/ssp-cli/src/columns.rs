//! # Columns Subcommand
//!
//! Prints the column positions a workbook resolves to, so a template
//! change can be checked before a run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use ssp_workbook::{
    column_letters, map_columns, match_headers, Column, ColumnMap, Sheet, Workbook, WorkbookConfig,
};

use crate::config::AssessConfig;
use crate::resolve_path;

/// Arguments for the `ssp columns` subcommand.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// SSP workbook to inspect.
    #[arg(long, value_name = "XLSX")]
    pub workbook: PathBuf,

    /// Worksheet to use instead of the configured one.
    #[arg(long)]
    pub sheet: Option<String>,
}

/// Resolved positions of one worksheet.
#[derive(Debug, Serialize)]
pub struct ColumnsReport {
    /// Worksheet title.
    pub sheet: String,
    /// Resolved 1-based positions.
    pub columns: ColumnMap,
    /// Spreadsheet letters per column.
    pub letters: Vec<(Column, String)>,
    /// Columns whose header did not match and came from the override policy.
    pub overridden: Vec<Column>,
}

/// Map a sheet's columns and note which positions the override policy set.
pub fn column_report<S: Sheet + ?Sized>(sheet: &S, config: &WorkbookConfig) -> Result<ColumnsReport> {
    let hints = &config.header_hints;
    let columns = map_columns(sheet, hints, &config.overrides)?;
    let by_header = match_headers(sheet, hints);

    Ok(ColumnsReport {
        sheet: sheet.name().to_string(),
        columns,
        letters: Column::all()
            .iter()
            .map(|c| (*c, column_letters(columns.position(*c))))
            .collect(),
        overridden: Column::all()
            .iter()
            .copied()
            .filter(|c| by_header.get(c) != Some(&columns.position(*c)))
            .collect(),
    })
}

/// Execute the columns subcommand.
pub fn run_columns(args: &ColumnsArgs, config: &AssessConfig, base: &Path) -> Result<u8> {
    let path = resolve_path(&args.workbook, base);
    let preferred = args
        .sheet
        .as_deref()
        .or(config.workbook.preferred_sheet.as_deref());
    let workbook = Workbook::open(&path, preferred)
        .with_context(|| format!("failed to open workbook: {}", path.display()))?;

    let report = column_report(workbook.sheet()?, &config.workbook)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}
