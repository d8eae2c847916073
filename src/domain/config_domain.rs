//! Configuration domain identifiers

use serde::{Deserialize, Serialize};

/// An independently stored category of server configuration.
///
/// The declaration order is the lock acquisition order used when a single
/// request writes more than one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigDomain {
    Session,
    HomeRealmIdentifiers,
    Authenticators,
    Cors,
    ScimProvisioning,
    Impersonation,
    SamlInboundAuth,
    PassiveStsInboundAuth,
}

impl ConfigDomain {
    /// Every registered domain, in lock order
    pub const ALL: [ConfigDomain; 8] = [
        ConfigDomain::Session,
        ConfigDomain::HomeRealmIdentifiers,
        ConfigDomain::Authenticators,
        ConfigDomain::Cors,
        ConfigDomain::ScimProvisioning,
        ConfigDomain::Impersonation,
        ConfigDomain::SamlInboundAuth,
        ConfigDomain::PassiveStsInboundAuth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::HomeRealmIdentifiers => "home-realm-identifiers",
            Self::Authenticators => "authenticators",
            Self::Cors => "cors",
            Self::ScimProvisioning => "scim-provisioning",
            Self::Impersonation => "impersonation",
            Self::SamlInboundAuth => "saml-inbound-auth",
            Self::PassiveStsInboundAuth => "passive-sts-inbound-auth",
        }
    }
}

impl std::fmt::Display for ConfigDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConfigDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigDomain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown configuration domain: {}", s))
    }
}
