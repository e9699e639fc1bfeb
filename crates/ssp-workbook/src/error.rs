//! Error types for workbook access.

use std::path::PathBuf;

use thiserror::Error;

use crate::columns::Column;

/// Errors raised while opening, mapping, or saving a workbook.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// Filesystem error.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet library could not read or write the file.
    #[error("spreadsheet error at {path}: {message}")]
    Spreadsheet {
        /// Workbook path.
        path: PathBuf,
        /// Library error message.
        message: String,
    },

    /// The workbook contains no worksheets.
    #[error("workbook {path} has no worksheets")]
    NoSheets {
        /// Workbook path.
        path: PathBuf,
    },

    /// A required column could not be located from the header row and the
    /// override policy provides no position for it.
    #[error("required column '{column}' not found in header row")]
    ColumnNotResolved {
        /// The unresolved logical column.
        column: Column,
    },
}
