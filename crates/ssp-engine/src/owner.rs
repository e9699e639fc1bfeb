//! # Owner Routing
//!
//! Maps a capability category to the label written to the "Responsible
//! Entity" column. Unknown or unparseable categories get the fallback
//! label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ssp_core::Capability;

/// Capability → responsible entity label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerTable {
    /// Label per capability.
    pub owners: BTreeMap<Capability, String>,
    /// Label for anything not in `owners`.
    pub fallback: String,
}

impl Default for OwnerTable {
    fn default() -> Self {
        let owners = [
            (Capability::Policy, "Policy Owner"),
            (Capability::Hardening, "Platform/Ops"),
            (Capability::Monitoring, "SecOps"),
            (Capability::Crypto, "Security Architecture"),
            (Capability::Network, "Network Ops"),
        ]
        .into_iter()
        .map(|(c, label)| (c, label.to_string()))
        .collect();
        Self {
            owners,
            fallback: "Owner".into(),
        }
    }
}

/// Pure lookup over an [`OwnerTable`].
#[derive(Debug, Clone, Default)]
pub struct OwnerRouter {
    table: OwnerTable,
}

impl OwnerRouter {
    /// Create a router over a table.
    pub fn new(table: OwnerTable) -> Self {
        Self { table }
    }

    /// Label for a capability.
    pub fn owner_for(&self, capability: Capability) -> &str {
        self.table
            .owners
            .get(&capability)
            .map(String::as_str)
            .unwrap_or(&self.table.fallback)
    }

    /// Label for a capability token such as `"crypto"`.
    pub fn route(&self, token: &str) -> &str {
        match token.parse::<Capability>() {
            Ok(capability) => self.owner_for(capability),
            Err(_) => &self.table.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_routes_every_capability() {
        let r = OwnerRouter::default();
        assert_eq!(r.route("policy"), "Policy Owner");
        assert_eq!(r.route("hardening"), "Platform/Ops");
        assert_eq!(r.route("monitoring"), "SecOps");
        assert_eq!(r.route("crypto"), "Security Architecture");
        assert_eq!(r.route("network"), "Network Ops");
    }

    #[test]
    fn unknown_token_gets_fallback() {
        let r = OwnerRouter::default();
        assert_eq!(r.route("physical"), "Owner");
        assert_eq!(r.route(""), "Owner");
    }

    #[test]
    fn partial_table_from_yaml_falls_back() {
        let table: OwnerTable =
            serde_yaml::from_str("owners:\n  crypto: Crypto Team\nfallback: Unassigned\n").unwrap();
        let r = OwnerRouter::new(table);
        assert_eq!(r.route("crypto"), "Crypto Team");
        assert_eq!(r.route("policy"), "Unassigned");
    }
}
