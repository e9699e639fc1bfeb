//! # Row Reading
//!
//! Rows are read once, from row 2 to the highest used row, into
//! [`SpreadsheetRow`] values; nothing re-reads the sheet afterwards.

use serde::Serialize;

use ssp_core::ControlId;

use crate::columns::ColumnMap;
use crate::sheet::Sheet;

/// One data row of the worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadsheetRow {
    /// 1-based sheet row.
    pub row_index: u32,
    /// Identifier as written (trimmed).
    pub identifier_raw: String,
    /// Upper-cased identifier.
    pub identifier_upper: String,
    /// Control description (trimmed).
    pub description: String,
    /// Whether the applicability cell holds a truthy value.
    pub is_applicable: bool,
}

impl SpreadsheetRow {
    /// The row's control identifier, if the cell is not blank.
    pub fn control_id(&self) -> Option<ControlId> {
        ControlId::new(&self.identifier_raw).ok()
    }
}

/// Default truthy spellings for the applicability column.
pub fn default_truthy_values() -> Vec<String> {
    ["y", "yes", "true", "1"].iter().map(|s| s.to_string()).collect()
}

/// Read every data row.
pub fn read_rows<S: Sheet + ?Sized>(
    sheet: &S,
    columns: &ColumnMap,
    truthy: &[String],
) -> Vec<SpreadsheetRow> {
    let rows: Vec<SpreadsheetRow> = (2..=sheet.highest_row())
        .map(|row| {
            let identifier_raw = sheet.cell_text(columns.identifier, row).trim().to_string();
            let flag = sheet.cell_text(columns.is_applicable, row);
            let flag = flag.trim();
            SpreadsheetRow {
                row_index: row,
                identifier_upper: identifier_raw.to_uppercase(),
                identifier_raw,
                description: sheet.cell_text(columns.description, row).trim().to_string(),
                is_applicable: truthy.iter().any(|t| t.trim().eq_ignore_ascii_case(flag)),
            }
        })
        .collect();
    tracing::debug!(sheet = sheet.name(), rows = rows.len(), "rows read");
    rows
}
