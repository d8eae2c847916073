//! Tenant records and the per-call tenant context

use super::common::StringUuid;
use crate::config::TenancyConfig;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical form of a tenant domain: trimmed and lowercased
pub fn normalize_tenant_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// Tenant status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    #[default]
    Active,
    Inactive,
}

impl std::str::FromStr for TenantStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TenantStatus::Active),
            "inactive" => Ok(TenantStatus::Inactive),
            _ => Err(format!("Unknown tenant status: {}", s)),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for TenantStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for TenantStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

/// Tenant row as provisioned outside this service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: StringUuid,
    pub domain: String,
    pub admin_username: String,
    pub status: TenantStatus,
}

/// Everything an operation needs to know about the calling tenant.
///
/// Built once per call and passed down explicitly; nothing here is shared
/// between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: StringUuid,
    pub domain: String,
    pub is_super_tenant: bool,
    pub admin_user: String,
    pub admin_role: String,
    pub everyone_role: String,
    pub saml_sso_url: String,
    pub saml_metadata_endpoint: String,
    pub passive_sts_url: String,
}

impl TenantContext {
    /// Derive the context of a resolved tenant.
    ///
    /// Derived endpoints are `{base}{segment}{suffix}` where the segment is
    /// empty for the super tenant and `/{prefix}/{domain}` otherwise.
    pub fn derive(tenant: &Tenant, tenancy: &TenancyConfig) -> Self {
        let is_super_tenant = tenant.domain == tenancy.super_tenant_domain;
        let segment = if is_super_tenant {
            String::new()
        } else {
            format!("/{}/{}", tenancy.tenant_path_prefix, tenant.domain)
        };
        let endpoint = |suffix: &str| format!("{}{}{}", tenancy.server_base_url, segment, suffix);

        Self {
            tenant_id: tenant.id,
            domain: tenant.domain.clone(),
            is_super_tenant,
            admin_user: tenant_aware_username(&tenant.admin_username, &tenant.domain),
            admin_role: tenancy.admin_role.clone(),
            everyone_role: tenancy.everyone_role.clone(),
            saml_sso_url: endpoint("/samlsso"),
            saml_metadata_endpoint: endpoint("/identity/metadata/saml2"),
            passive_sts_url: endpoint("/passivests"),
        }
    }
}

/// Strip a trailing `@{domain}` qualifier from a username.
pub fn tenant_aware_username(username: &str, domain: &str) -> String {
    username
        .strip_suffix(domain)
        .and_then(|rest| rest.strip_suffix('@'))
        .unwrap_or(username)
        .to_string()
}
