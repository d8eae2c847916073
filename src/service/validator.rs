//! Domain invariant checks run on every candidate value before it is written

use crate::domain::{
    system_authenticators, AuthenticatorsConfig, DefinedBy, ScimProvisioningConfig,
    TenantContext, PRIMARY_USERSTORE,
};
use crate::error::{AppError, Result};
use std::collections::HashSet;
use validator::Validate;

/// Tenant-scoped facts a validator may consult
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    pub tenant: &'a TenantContext,
    /// Secondary userstores of the tenant; the primary userstore is implicit
    pub user_stores: Vec<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(tenant: &'a TenantContext, user_stores: Vec<String>) -> Self {
        Self {
            tenant,
            user_stores,
        }
    }

    pub fn has_user_store(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(PRIMARY_USERSTORE)
            || self.user_stores.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

/// Record-level invariants beyond the field-level `validator` rules
pub trait CrossCheck {
    fn cross_check(&self, _ctx: &ValidationContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Runs field rules and cross-record invariants for one domain value
pub struct DomainValidator;

impl DomainValidator {
    pub fn check<T: Validate + CrossCheck>(candidate: &T, ctx: &ValidationContext<'_>) -> Result<()> {
        candidate.validate()?;
        candidate.cross_check(ctx)
    }
}

impl CrossCheck for ScimProvisioningConfig {
    fn cross_check(&self, ctx: &ValidationContext<'_>) -> Result<()> {
        if !ctx.has_user_store(&self.provisioning_userstore) {
            return Err(AppError::ValidationFailed(format!(
                "provisioningUserstore '{}' does not reference an existing userstore",
                self.provisioning_userstore
            )));
        }
        Ok(())
    }
}

impl CrossCheck for AuthenticatorsConfig {
    fn cross_check(&self, _ctx: &ValidationContext<'_>) -> Result<()> {
        let catalog = system_authenticators();
        let mut seen = HashSet::new();

        for authenticator in &self.0 {
            if !seen.insert(authenticator.id.as_str()) {
                return Err(AppError::ValidationFailed(format!(
                    "Duplicate authenticator id '{}'",
                    authenticator.id
                )));
            }

            match catalog.iter().find(|a| a.id == authenticator.id) {
                Some(system) => {
                    if authenticator.defined_by != DefinedBy::System {
                        return Err(AppError::ValidationFailed(format!(
                            "System authenticator '{}' must stay definedBy SYSTEM",
                            system.name
                        )));
                    }
                    if authenticator.name != system.name {
                        return Err(AppError::ValidationFailed(format!(
                            "System authenticator '{}' cannot be renamed",
                            system.name
                        )));
                    }
                }
                None if authenticator.defined_by == DefinedBy::System => {
                    return Err(AppError::ValidationFailed(format!(
                        "Authenticator '{}' is not a system authenticator",
                        authenticator.name
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }
}

impl CrossCheck for crate::domain::SessionConfig {}
impl CrossCheck for crate::domain::HomeRealmConfig {}
impl CrossCheck for crate::domain::CorsConfig {}
impl CrossCheck for crate::domain::ImpersonationConfig {}
impl CrossCheck for crate::domain::SamlInboundAuthConfig {}
impl CrossCheck for crate::domain::PassiveStsInboundAuthConfig {}
