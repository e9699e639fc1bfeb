//! # Control Validators
//!
//! A [`ControlValidator`] extracts a concrete value from a control's ranked
//! test-system files and compares it against a policy threshold. The
//! [`ValidatorRegistry`] maps control identifiers to validators and holds no
//! control-specific logic of its own; adding a control means registering a
//! new validator.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use ssp_core::{ControlId, Decision};

use crate::config::MaxAgeSpec;
use crate::error::EngineError;
use crate::max_age::MaxAgeValidator;

/// Result of running a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A value was found and compared.
    Decided(Decision),
    /// No explicit value was found in any file.
    Undecided,
}

/// Control-specific value extractor.
pub trait ControlValidator: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Inspect ranked files (highest first) and decide, if possible.
    fn validate(&self, description: &str, files: &[PathBuf]) -> Verdict;

    /// Remediation text for an undecided result.
    fn remediation(&self, _description: &str) -> Option<String> {
        None
    }
}

/// Control identifier → validator.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    validators: BTreeMap<ControlId, Box<dyn ControlValidator>>,
}

impl ValidatorRegistry {
    /// An empty registry: every control takes the generic path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one max-age validator per specification.
    pub fn from_specs(specs: &[MaxAgeSpec], max_read_bytes: u64) -> Result<Self, EngineError> {
        let mut registry = Self::new();
        for spec in specs {
            let id = ControlId::new(&spec.control_id)?;
            let validator = MaxAgeValidator::from_spec(spec, max_read_bytes)?;
            if registry.register(id.clone(), Box::new(validator)).is_some() {
                tracing::warn!(control_id = %id, "duplicate validator specification; last one wins");
            }
        }
        Ok(registry)
    }

    /// Register a validator, returning any it replaced.
    pub fn register(
        &mut self,
        control: ControlId,
        validator: Box<dyn ControlValidator>,
    ) -> Option<Box<dyn ControlValidator>> {
        self.validators.insert(control, validator)
    }

    /// Validator for a control, if any.
    pub fn get(&self, control: &ControlId) -> Option<&dyn ControlValidator> {
        self.validators.get(control).map(|v| v.as_ref())
    }

    /// Whether a validator exists for a control.
    pub fn contains(&self, control: &ControlId) -> bool {
        self.validators.contains_key(control)
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
