//! # ssp-workbook — SSP Workbook Access
//!
//! Reads control rows from a System Security Plan workbook and writes the
//! assessment outcome back, three cells per row, to a new file.
//!
//! ## Flow
//!
//! ```text
//! Workbook::open ─► map_columns ─► read_rows ─► RowWriter::write ×N ─► Workbook::save_as
//!  (read copy)     (hints, then    (once)       (entity, status,       (timestamped,
//!                   override                     comments only)          never the input)
//!                   policy)
//! ```
//!
//! Column mapping, row reading and writing operate on the [`Sheet`] trait,
//! so they run unchanged against a `umya_spreadsheet::Worksheet` or an
//! in-memory [`MemorySheet`].

pub mod columns;
pub mod config;
pub mod error;
pub mod rows;
pub mod save;
pub mod sheet;
pub mod workbook;
pub mod writer;

pub use columns::{map_columns, match_headers, Column, ColumnMap, ColumnOverridePolicy, HeaderHints};
pub use config::{WorkbookConfig, DEFAULT_SHEET};
pub use error::WorkbookError;
pub use rows::{default_truthy_values, read_rows, SpreadsheetRow};
pub use save::{prepare_target, timestamped_target};
pub use sheet::{column_letters, MemorySheet, Sheet};
pub use workbook::Workbook;
pub use writer::{CellRef, RowWriter};
