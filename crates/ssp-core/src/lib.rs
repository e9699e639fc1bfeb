#![deny(missing_docs)]
//! # ssp-core — Foundational Types for the SSP Assessment Stack
//!
//! Every other crate in the workspace depends on `ssp-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype for control identifiers.** [`ControlId`] stores the trimmed,
//!    upper-cased form, so every comparison between identifiers is
//!    case-insensitive by construction. No bare strings for identifiers.
//!
//! 2. **Closed status set.** [`Status`] has exactly three variants
//!    (Comply / Partial / Gap). A [`Decision`] can never carry anything else.
//!
//! 3. **Single `Capability` enum.** The five capability categories used to
//!    route a control to a responsible entity are defined once, here.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ssp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod capability;
pub mod control;
pub mod error;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use capability::Capability;
pub use control::{ControlId, ControlRecord};
pub use error::ValidationError;
pub use status::{Decision, Status};
