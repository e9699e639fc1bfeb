//! # ssp-engine — Compliance Decisions
//!
//! Renders a deterministic Comply / Partial / Gap verdict for a control from
//! its test-system evidence, and routes the control to a responsible entity.
//!
//! ## Components
//!
//! - [`validator`]: the [`ControlValidator`] trait and the
//!   [`ValidatorRegistry`] keyed by control identifier.
//! - [`max_age`]: the shipped numeric-threshold validator.
//! - [`decision`]: the four decision rules.
//! - [`owner`]: capability → responsible entity lookup.
//! - [`classifier`] and [`agent`]: seams for external collaborators.
//!
//! All tables (validators, owners, classifier rules) are built once at
//! startup and passed in; nothing here holds mutable global state.

pub mod agent;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod error;
pub mod max_age;
pub mod owner;
pub mod validator;

pub use agent::{consult, AssessmentAgent, AssessmentTask};
pub use classifier::{CapabilityClassifier, ClassifierRule, KeywordClassifier};
pub use config::{default_validator_specs, MaxAgeSpec};
pub use decision::{DecisionBasis, DecisionEngine, DecisionOutcome};
pub use error::EngineError;
pub use max_age::MaxAgeValidator;
pub use owner::{OwnerRouter, OwnerTable};
pub use validator::{ControlValidator, ValidatorRegistry, Verdict};
