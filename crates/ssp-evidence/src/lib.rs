//! # ssp-evidence — Evidence Resolution
//!
//! Given a control identifier, its free-text description, and up to two file
//! trees (the *test system* under assessment and the *gold blueprint*), this
//! crate finds the files most likely to prove or disprove the control.
//!
//! ## Pipeline
//!
//! ```text
//! resolve_root ─► HintTable::keywords_for ─► discover ─► rank ─► FileEvidence
//!                                                               (test, gold)
//! ```
//!
//! - [`root`] normalizes a directory or `.zip` archive into a browsable root.
//! - [`hints`] derives search terms from a per-control table and the
//!   description's topic markers.
//! - [`discovery`] lists candidate files, preferred subdirectories first.
//! - [`scoring`] ranks candidates so configuration artifacts beat prose.
//! - [`summary`] assembles the per-control [`EvidenceSummary`].
//!
//! ## Determinism
//!
//! All scoring is static and rule-based. Directory walks are sorted by file
//! name and ranking uses a stable sort, so the same tree always yields the
//! same ordered evidence.
//!
//! ## Failure Policy
//!
//! Missing roots, unreadable files, and oversized files are not errors: they
//! degrade to empty evidence or empty content. The only fallible operations
//! are configuration validation and archive extraction, and the latter is
//! logged and mapped to "no root" by [`resolve_root`].

pub mod config;
pub mod discovery;
pub mod error;
pub mod hints;
pub mod read;
pub mod root;
pub mod scoring;
pub mod summary;

pub use config::EvidenceConfig;
pub use discovery::{discover, Candidate};
pub use error::EvidenceError;
pub use hints::{DescriptionTrigger, HintTable};
pub use read::{read_small_text, FileText, DEFAULT_MAX_READ_BYTES};
pub use root::{resolve_root, ResolvedRoot};
pub use scoring::{rank, score_candidate, RankedFile};
pub use summary::{EvidenceBuilder, EvidenceSummary, FileEvidence};
