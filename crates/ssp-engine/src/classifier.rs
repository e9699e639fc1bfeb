//! # Capability Classification
//!
//! The capability of a control decides who owns it. Classification is an
//! external concern (usually a language-model selector); this module
//! defines the seam, [`CapabilityClassifier`], and ships an offline
//! [`KeywordClassifier`] that applies the same routing rules by keyword.
//!
//! Rules are tried in order; the first rule with a matching term wins and
//! a control matching none is `hardening`.

use ssp_core::{Capability, ControlId};

/// Names the capability category of a control.
pub trait CapabilityClassifier {
    /// Return a capability token (`policy`, `hardening`, `monitoring`,
    /// `crypto`, `network`) or a selector reply naming one.
    fn classify(&self, control: &ControlId, description: &str) -> String;
}

/// Terms that route a control to one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRule {
    /// Category assigned on a match.
    pub capability: Capability,
    /// Whole words or phrases, lower-case.
    pub terms: Vec<String>,
}

impl ClassifierRule {
    fn new(capability: Capability, terms: &[&str]) -> Self {
        Self {
            capability,
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Offline classifier over ordered keyword rules.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<ClassifierRule>,
}

impl KeywordClassifier {
    /// Create a classifier over explicit rules.
    pub fn new(rules: Vec<ClassifierRule>) -> Self {
        Self { rules }
    }

    /// The category for a description.
    pub fn capability_of(&self, description: &str) -> Capability {
        let text = normalize(description);
        self.rules
            .iter()
            .find(|rule| {
                rule.terms.iter().any(|term| {
                    let term = normalize(term);
                    !term.trim().is_empty() && text.contains(&term)
                })
            })
            .map(|rule| rule.capability)
            .unwrap_or(Capability::Hardening)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(vec![
            ClassifierRule::new(
                Capability::Policy,
                &[
                    "policy",
                    "policies",
                    "governance",
                    "documentation",
                    "documented",
                    "ownership",
                    "responsibilities",
                    "procedures",
                    "security plan",
                ],
            ),
            ClassifierRule::new(
                Capability::Crypto,
                &[
                    "tls",
                    "ssl",
                    "ssh",
                    "ipsec",
                    "key",
                    "keys",
                    "cipher",
                    "ciphers",
                    "cryptographic",
                    "encryption",
                    "encrypted",
                    "certificate",
                    "certificates",
                ],
            ),
            ClassifierRule::new(
                Capability::Network,
                &[
                    "nsg",
                    "nsgs",
                    "network security group",
                    "firewall",
                    "firewalls",
                    "segmentation",
                    "segregation",
                    "egress",
                    "ingress",
                    "wi-fi",
                    "wifi",
                    "wireless",
                    "cds",
                    "cross domain",
                ],
            ),
            ClassifierRule::new(
                Capability::Monitoring,
                &[
                    "log",
                    "logs",
                    "logging",
                    "retention",
                    "retained",
                    "alert",
                    "alerts",
                    "alerting",
                    "detection",
                    "detections",
                    "siem",
                    "monitored",
                    "monitoring",
                ],
            ),
        ])
    }
}

impl CapabilityClassifier for KeywordClassifier {
    fn classify(&self, control: &ControlId, description: &str) -> String {
        let capability = self.capability_of(description);
        tracing::trace!(control_id = %control, capability = %capability, "classified");
        capability.as_str().to_string()
    }
}

/// Lower-case, punctuation to single spaces, padded so ` term ` matches
/// whole words only.
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}
