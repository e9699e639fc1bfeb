//! # Sheet Access
//!
//! [`Sheet`] is the narrow cell interface the mapper, reader and writer
//! need: text by 1-based `(column, row)`, set text, and the used range.
//! It is implemented for `umya_spreadsheet::Worksheet` and for the
//! in-memory [`MemorySheet`].

use std::collections::BTreeMap;

/// 1-based cell access.
pub trait Sheet {
    /// Sheet title.
    fn name(&self) -> &str;

    /// Cell text, empty when the cell is absent.
    fn cell_text(&self, column: u32, row: u32) -> String;

    /// Replace a cell's content with text.
    fn set_cell_text(&mut self, column: u32, row: u32, value: &str);

    /// Highest used row (0 when empty).
    fn highest_row(&self) -> u32;

    /// Highest used column (0 when empty).
    fn highest_column(&self) -> u32;
}

impl Sheet for umya_spreadsheet::Worksheet {
    fn name(&self) -> &str {
        self.get_name()
    }

    fn cell_text(&self, column: u32, row: u32) -> String {
        self.get_value((column, row))
    }

    fn set_cell_text(&mut self, column: u32, row: u32, value: &str) {
        self.get_cell_mut((column, row)).set_value(value);
    }

    fn highest_row(&self) -> u32 {
        self.get_highest_row()
    }

    fn highest_column(&self) -> u32 {
        self.get_highest_column()
    }
}

/// A sheet held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<(u32, u32), String>,
}

impl MemorySheet {
    /// An empty sheet with a title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Build a sheet from rows of text, starting at row 1, column 1.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                let value: String = value.into();
                if !value.is_empty() {
                    sheet.set_cell_text(c as u32 + 1, r as u32 + 1, &value);
                }
            }
        }
        sheet
    }

    /// Coordinates of every non-empty cell.
    pub fn populated(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells.keys().copied()
    }
}

impl Sheet for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_text(&self, column: u32, row: u32) -> String {
        self.cells.get(&(column, row)).cloned().unwrap_or_default()
    }

    fn set_cell_text(&mut self, column: u32, row: u32, value: &str) {
        self.cells.insert((column, row), value.to_string());
    }

    fn highest_row(&self) -> u32 {
        self.cells.keys().map(|(_, r)| *r).max().unwrap_or(0)
    }

    fn highest_column(&self) -> u32 {
        self.cells.keys().map(|(c, _)| *c).max().unwrap_or(0)
    }
}

/// Spreadsheet letters for a 1-based column (`1` → `A`, `28` → `AB`).
pub fn column_letters(column: u32) -> String {
    umya_spreadsheet::helper::coordinate::string_from_column_index(&column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sheet_tracks_used_range() {
        let mut s = MemorySheet::new("March 2025");
        assert_eq!((s.highest_row(), s.highest_column()), (0, 0));
        s.set_cell_text(9, 3, "Yes");
        s.set_cell_text(2, 7, "x");
        assert_eq!((s.highest_row(), s.highest_column()), (7, 9));
        assert_eq!(s.cell_text(9, 3), "Yes");
        assert_eq!(s.cell_text(1, 1), "");
    }

    #[test]
    fn from_rows_skips_blank_cells() {
        let s = MemorySheet::from_rows("S", [vec!["a", "", "c"], vec!["", "e", ""]]);
        assert_eq!(s.populated().collect::<Vec<_>>(), vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn column_letters_follow_spreadsheet_convention() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(4), "D");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn umya_worksheet_implements_sheet() {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).unwrap();
        ws.set_cell_text(16, 2, "Platform/Ops");
        assert_eq!(ws.cell_text(16, 2), "Platform/Ops");
        assert!(ws.highest_row() >= 2);
        assert!(ws.highest_column() >= 16);
    }
}
