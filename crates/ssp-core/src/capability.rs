//! # Capability Categories
//!
//! Coarse categories used to route a control to the entity responsible for
//! it. An external classifier (typically a language-model selector) names one
//! of five agents; [`Capability::from_selector_reply`] turns its reply into a
//! category, defaulting to [`Capability::Hardening`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Capability category of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Governance, documentation, ownership, policy language.
    Policy,
    /// OS, application, authentication, and virtualisation baselines.
    Hardening,
    /// Logging, retention, alerting, detections.
    Monitoring,
    /// TLS, SSH, IPsec, keys, ciphers.
    Crypto,
    /// Network security groups, firewalls, segmentation, egress.
    Network,
}

impl Capability {
    /// All categories in canonical order.
    pub fn all() -> &'static [Capability] {
        &[
            Self::Policy,
            Self::Hardening,
            Self::Monitoring,
            Self::Crypto,
            Self::Network,
        ]
    }

    /// The snake_case token for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Hardening => "hardening",
            Self::Monitoring => "monitoring",
            Self::Crypto => "crypto",
            Self::Network => "network",
        }
    }

    /// Interpret a selector reply such as `{"agent":"crypto_agent", ...}`.
    ///
    /// Agent names are searched in a fixed order (policy, crypto, network,
    /// monitoring); a reply that is exactly a bare category token is also
    /// accepted. Anything unrecognized is [`Capability::Hardening`].
    pub fn from_selector_reply(reply: &str) -> Self {
        let lower = reply.to_ascii_lowercase();
        const AGENTS: [(&str, Capability); 4] = [
            ("policy_agent", Capability::Policy),
            ("crypto_agent", Capability::Crypto),
            ("network_agent", Capability::Network),
            ("monitoring_agent", Capability::Monitoring),
        ];
        for (needle, capability) in AGENTS {
            if lower.contains(needle) {
                return capability;
            }
        }
        lower.trim().parse().unwrap_or(Self::Hardening)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "policy" => Ok(Self::Policy),
            "hardening" => Ok(Self::Hardening),
            "monitoring" => Ok(Self::Monitoring),
            "crypto" => Ok(Self::Crypto),
            "network" => Ok(Self::Network),
            other => Err(ValidationError::UnknownCapability(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_roundtrip() {
        for c in Capability::all() {
            assert_eq!(c.as_str().parse::<Capability>().unwrap(), *c);
        }
    }

    #[test]
    fn selector_reply_with_agent_name() {
        assert_eq!(
            Capability::from_selector_reply(r#"{"agent":"crypto_agent","reason":"TLS"}"#),
            Capability::Crypto
        );
        assert_eq!(
            Capability::from_selector_reply("Route to NETWORK_AGENT please"),
            Capability::Network
        );
    }

    #[test]
    fn selector_reply_prefers_policy_when_several_named() {
        assert_eq!(
            Capability::from_selector_reply("monitoring_agent or policy_agent"),
            Capability::Policy
        );
    }

    #[test]
    fn selector_reply_accepts_bare_token() {
        assert_eq!(
            Capability::from_selector_reply(" monitoring "),
            Capability::Monitoring
        );
    }

    #[test]
    fn unrecognized_reply_defaults_to_hardening() {
        assert_eq!(Capability::from_selector_reply(""), Capability::Hardening);
        assert_eq!(
            Capability::from_selector_reply("no idea"),
            Capability::Hardening
        );
    }
}
