//! # Row Write-Back
//!
//! Writes the three outcome cells of a row (responsible entity,
//! implementation status, implementation comments) and nothing else.

use std::fmt;

use serde::{Serialize, Serializer};

use ssp_core::Status;

use crate::columns::ColumnMap;
use crate::sheet::{column_letters, Sheet};

/// A written cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// 1-based column.
    pub column: u32,
    /// 1-based row.
    pub row: u32,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row)
    }
}

impl Serialize for CellRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Writes outcome cells at mapped positions.
pub struct RowWriter<'a, S: Sheet + ?Sized> {
    sheet: &'a mut S,
    columns: ColumnMap,
}

impl<'a, S: Sheet + ?Sized> RowWriter<'a, S> {
    /// Create a writer over a sheet.
    pub fn new(sheet: &'a mut S, columns: ColumnMap) -> Self {
        Self { sheet, columns }
    }

    /// Write entity, status and comment for one row.
    pub fn write(&mut self, row: u32, entity: &str, status: Status, comment: &str) -> [CellRef; 3] {
        let cells = [
            (self.columns.responsible_entity, entity),
            (self.columns.implementation_status, status.as_str()),
            (self.columns.implementation_comments, comment),
        ];
        cells.map(|(column, value)| {
            self.sheet.set_cell_text(column, row, value);
            CellRef { column, row }
        })
    }
}
