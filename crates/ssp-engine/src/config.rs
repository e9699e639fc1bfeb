//! Validator specifications as read from configuration.

use serde::{Deserialize, Serialize};

/// Declares a max-age style validator: a numeric setting whose value, in
/// days, must not exceed a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxAgeSpec {
    /// Control the validator is registered for.
    pub control_id: String,
    /// Setting name searched for in files (e.g. `MaximumPasswordAge`).
    pub setting: String,
    /// Subject used in comments (e.g. `Password age`).
    pub subject: String,
    /// Free-text spellings of the setting, matched by proximity.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Threshold used when the description states none.
    #[serde(default = "default_threshold_days")]
    pub default_threshold_days: u64,
}

fn default_threshold_days() -> u64 {
    30
}

/// The shipped validators.
pub fn default_validator_specs() -> Vec<MaxAgeSpec> {
    vec![MaxAgeSpec {
        control_id: "ISM-1955".into(),
        setting: "MaximumPasswordAge".into(),
        subject: "Password age".into(),
        aliases: vec!["maximum password age".into(), "max password age".into()],
        default_threshold_days: default_threshold_days(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_spec_fills_optional_fields() {
        let spec: MaxAgeSpec = serde_yaml::from_str(
            "control_id: ISM-1403\nsetting: LockoutDuration\nsubject: Lockout duration\n",
        )
        .unwrap();
        assert!(spec.aliases.is_empty());
        assert_eq!(spec.default_threshold_days, 30);
    }
}
