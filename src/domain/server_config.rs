//! Composite server configuration view

use super::authenticator::Authenticator;
use super::cors::CorsConfig;
use super::inbound_auth::InboundAuthenticationView;
use super::provisioning::{ImpersonationConfig, ProvisioningView};
use super::tenant::TenantContext;
use serde::Serialize;
use utoipa::ToSchema;

/// Realm identity of a tenant; derived, never patched
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealmConfig {
    pub admin_user: String,
    pub admin_role: String,
    pub everyone_role: String,
}

impl From<&TenantContext> for RealmConfig {
    fn from(ctx: &TenantContext) -> Self {
        Self {
            admin_user: ctx.admin_user.clone(),
            admin_role: ctx.admin_role.clone(),
            everyone_role: ctx.everyone_role.clone(),
        }
    }
}

/// All configuration domains of one tenant, assembled on read
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfiguration {
    pub idle_session_timeout_period: i64,
    pub remember_me_period: i64,
    pub home_realm_identifiers: Vec<String>,
    pub provisioning: ProvisioningView,
    pub authenticators: Vec<Authenticator>,
    pub cors: CorsConfig,
    pub impersonation: ImpersonationConfig,
    pub inbound_authentication: InboundAuthenticationView,
    pub realm_config: RealmConfig,
}
