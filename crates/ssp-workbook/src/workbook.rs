//! # Workbook Files
//!
//! Opening copies the input into a scratch directory and reads the copy,
//! since the original may be locked by a spreadsheet application. The
//! worksheet used is the one whose title matches the preferred name
//! (case-insensitive), else the first sheet. Saving goes through
//! [`crate::save`] and never touches the input path.

use std::path::{Path, PathBuf};

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::WorkbookError;
use crate::save::prepare_target;

/// An opened workbook with a selected worksheet.
pub struct Workbook {
    source: PathBuf,
    book: Spreadsheet,
    sheet_index: usize,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("source", &self.source)
            .field("sheet_index", &self.sheet_index)
            .finish_non_exhaustive()
    }
}

impl Workbook {
    /// Open a workbook from a read copy and select a worksheet.
    pub fn open(path: &Path, preferred_sheet: Option<&str>) -> Result<Self, WorkbookError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| WorkbookError::Io { path, source }
        };

        let scratch = tempfile::Builder::new()
            .prefix("ssp_read_")
            .tempdir()
            .map_err(io_err(path))?;
        let file_name = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("workbook.xlsx"));
        let copy = scratch.path().join(file_name);
        std::fs::copy(path, &copy).map_err(io_err(path))?;

        let book = umya_spreadsheet::reader::xlsx::read(&copy).map_err(|e| {
            WorkbookError::Spreadsheet {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let sheet_index = select_sheet(&book, preferred_sheet).ok_or_else(|| {
            WorkbookError::NoSheets {
                path: path.to_path_buf(),
            }
        })?;

        let workbook = Self {
            source: path.to_path_buf(),
            book,
            sheet_index,
        };
        tracing::info!(
            path = %path.display(),
            sheet = workbook.sheet_name(),
            "workbook opened"
        );
        Ok(workbook)
    }

    /// Title of the selected worksheet.
    pub fn sheet_name(&self) -> &str {
        self.book
            .get_sheet(&self.sheet_index)
            .map(|ws| ws.get_name())
            .unwrap_or_default()
    }

    /// The selected worksheet.
    pub fn sheet(&self) -> Result<&Worksheet, WorkbookError> {
        self.book
            .get_sheet(&self.sheet_index)
            .ok_or_else(|| WorkbookError::NoSheets {
                path: self.source.clone(),
            })
    }

    /// The selected worksheet, mutably.
    pub fn sheet_mut(&mut self) -> Result<&mut Worksheet, WorkbookError> {
        let path = self.source.clone();
        self.book
            .get_sheet_mut(&self.sheet_index)
            .ok_or(WorkbookError::NoSheets { path })
    }

    /// Save to a new timestamped path beside `requested`; returns the path.
    pub fn save_as(&self, requested: &Path) -> Result<PathBuf, WorkbookError> {
        let now = chrono::Local::now().naive_local();
        let target = prepare_target(requested, &self.source, now)?;
        umya_spreadsheet::writer::xlsx::write(&self.book, &target).map_err(|e| {
            WorkbookError::Spreadsheet {
                path: target.clone(),
                message: e.to_string(),
            }
        })?;
        tracing::info!(path = %target.display(), "workbook saved");
        Ok(target)
    }
}

fn select_sheet(book: &Spreadsheet, preferred: Option<&str>) -> Option<usize> {
    let sheets = book.get_sheet_collection();
    if sheets.is_empty() {
        return None;
    }
    let wanted = preferred.map(str::trim).filter(|p| !p.is_empty());
    let found = wanted.and_then(|name| {
        sheets
            .iter()
            .position(|ws| ws.get_name().trim().eq_ignore_ascii_case(name))
    });
    if found.is_none() {
        if let Some(name) = wanted {
            tracing::debug!(preferred = name, "preferred sheet absent; using first sheet");
        }
    }
    Some(found.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;

    fn write_book(path: &Path, sheets: &[&str]) {
        let mut book = umya_spreadsheet::new_file();
        for name in sheets.iter().skip(1) {
            book.new_sheet(*name).unwrap();
        }
        book.get_sheet_mut(&0).unwrap().set_name(sheets[0]);
        for (i, name) in sheets.iter().enumerate() {
            book.get_sheet_mut(&i).unwrap().set_cell_text(1, 1, name);
        }
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn preferred_sheet_is_selected_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssp.xlsx");
        write_book(&path, &["Cover", "March 2025"]);

        let wb = Workbook::open(&path, Some("march 2025")).unwrap();
        assert_eq!(wb.sheet_name(), "March 2025");
        assert_eq!(wb.sheet().unwrap().cell_text(1, 1), "March 2025");
    }

    #[test]
    fn first_sheet_when_preference_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssp.xlsx");
        write_book(&path, &["Cover", "Controls"]);
        assert_eq!(Workbook::open(&path, Some("March 2025")).unwrap().sheet_name(), "Cover");
        assert_eq!(Workbook::open(&path, None).unwrap().sheet_name(), "Cover");
    }

    #[test]
    fn save_leaves_input_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssp.xlsx");
        write_book(&path, &["March 2025"]);
        let original = std::fs::read(&path).unwrap();

        let mut wb = Workbook::open(&path, None).unwrap();
        wb.sheet_mut().unwrap().set_cell_text(17, 2, "Gap");
        let saved = wb.save_as(&path).unwrap();

        assert_ne!(saved, path);
        assert_eq!(std::fs::read(&path).unwrap(), original);
        let reopened = Workbook::open(&saved, None).unwrap();
        assert_eq!(reopened.sheet().unwrap().cell_text(17, 2), "Gap");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Workbook::open(&dir.path().join("absent.xlsx"), None),
            Err(WorkbookError::Io { .. })
        ));
    }
}
