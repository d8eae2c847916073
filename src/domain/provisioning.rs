//! Inbound provisioning (SCIM) and impersonation records

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Userstore every tenant owns
pub const PRIMARY_USERSTORE: &str = "PRIMARY";

/// Inbound SCIM provisioning settings (replaced in full, never patched over REST)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScimProvisioningConfig {
    #[validate(length(min = 1, message = "provisioningUserstore must not be empty"))]
    pub provisioning_userstore: String,
    pub enable_proxy_mode: bool,
}

impl Default for ScimProvisioningConfig {
    fn default() -> Self {
        Self {
            provisioning_userstore: PRIMARY_USERSTORE.to_string(),
            enable_proxy_mode: false,
        }
    }
}

/// `provisioning.inbound.scim` nesting of the composite view
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProvisioningView {
    pub inbound: InboundProvisioningView,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InboundProvisioningView {
    pub scim: ScimProvisioningConfig,
}

impl From<ScimProvisioningConfig> for ProvisioningView {
    fn from(scim: ScimProvisioningConfig) -> Self {
        Self {
            inbound: InboundProvisioningView { scim },
        }
    }
}

/// Impersonation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImpersonationConfig {
    pub enable_email_notification: bool,
}

impl Default for ImpersonationConfig {
    fn default() -> Self {
        Self {
            enable_email_notification: true,
        }
    }
}
