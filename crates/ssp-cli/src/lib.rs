//! # ssp-cli — CLI Tool for the SSP Assessment Stack
//!
//! Provides the `ssp` command-line interface.
//!
//! ## Subcommands
//!
//! - `ssp assess`: Fill an SSP workbook from test-system evidence.
//! - `ssp evidence`: Show ranked evidence and the decision for one control.
//! - `ssp columns`: Show how a workbook's columns resolve.
//!
//! ```bash
//! ssp -v assess --workbook ssp.xlsx --out out/ssp.xlsx --test-system system.zip
//! ssp evidence --control ISM-1955 --test-system ./system
//! ssp columns --workbook ssp.xlsx --sheet "March 2025"
//! ```

pub mod assess;
pub mod catalogue;
pub mod columns;
pub mod config;
pub mod evidence;
pub mod pipeline;

use std::path::{Path, PathBuf};

/// Locate a command-line path.
///
/// `base` is the directory holding the `--config` file, or the working
/// directory when no config is given. A relative input that exists under
/// `base` is taken from there, so a config file can sit beside its
/// workbook and catalogue. Anything else, including outputs that do not
/// exist yet, is left as typed.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    Some(path)
        .filter(|p| p.is_relative())
        .map(|p| base.join(p))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
