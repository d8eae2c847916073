//! Tenant-scoped configuration aggregation and partial updates

use super::lock::DomainLocks;
use super::registry::{ConfigDomainRegistry, DomainHandler, DomainRecord};
use super::tenant_context::TenantResolver;
use super::validator::ValidationContext;
use crate::cache::CacheOperations;
use crate::config::TenancyConfig;
use crate::domain::{
    Authenticator, AuthenticatorsConfig, ConfigDomain, CorsConfig, HomeRealmConfig,
    ImpersonationConfig, InboundAuthenticationView, PassiveStsInboundAuthConfig,
    PassiveStsInboundAuthView, PatchOperation, RealmConfig, SamlInboundAuthConfig,
    SamlInboundAuthView, ScimProvisioningConfig, ServerConfiguration, SessionConfig,
    TenantContext,
};
use crate::error::{AppError, Result};
use crate::repository::{DomainConfigRepository, TenantRepository, UserStoreRepository};
use crate::telemetry::metrics::{record_patch, record_write};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates reads across all domains and validated writes to one domain
pub struct ConfigService<D: ?Sized, T: ?Sized, U: ?Sized, C: ?Sized> {
    domain_repo: Arc<D>,
    user_store_repo: Arc<U>,
    tenants: TenantResolver<T, C>,
    locks: DomainLocks,
}

impl<D, T, U, C> ConfigService<D, T, U, C>
where
    D: DomainConfigRepository + ?Sized,
    T: TenantRepository + ?Sized,
    U: UserStoreRepository + ?Sized,
    C: CacheOperations + ?Sized,
{
    pub fn new(
        domain_repo: Arc<D>,
        tenant_repo: Arc<T>,
        user_store_repo: Arc<U>,
        cache: Arc<C>,
        tenancy: TenancyConfig,
    ) -> Self {
        Self {
            domain_repo,
            user_store_repo,
            tenants: TenantResolver::new(tenant_repo, cache, tenancy),
            locks: DomainLocks::new(),
        }
    }

    /// Resolve the caller's tenant domain
    pub async fn resolve_tenant(&self, domain: &str) -> Result<TenantContext> {
        self.tenants.resolve(domain).await
    }

    /// Whether the domain store is reachable
    pub async fn is_ready(&self) -> bool {
        self.domain_repo.ping().await.is_ok()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Composite view of every domain for one tenant
    pub async fn read_all(&self, ctx: &TenantContext) -> Result<ServerConfiguration> {
        let (session, home_realm, authenticators, cors, scim, impersonation, saml, passive_sts) = tokio::try_join!(
            self.read_record::<SessionConfig>(ctx),
            self.read_record::<HomeRealmConfig>(ctx),
            self.read_record::<AuthenticatorsConfig>(ctx),
            self.read_record::<CorsConfig>(ctx),
            self.read_record::<ScimProvisioningConfig>(ctx),
            self.read_record::<ImpersonationConfig>(ctx),
            self.read_record::<SamlInboundAuthConfig>(ctx),
            self.read_record::<PassiveStsInboundAuthConfig>(ctx),
        )?;

        debug!(tenant = %ctx.domain, "Assembled server configuration");

        Ok(ServerConfiguration {
            idle_session_timeout_period: session.idle_session_timeout_period,
            remember_me_period: session.remember_me_period,
            home_realm_identifiers: home_realm.home_realm_identifiers,
            provisioning: scim.into(),
            authenticators: authenticators.0,
            cors,
            impersonation,
            inbound_authentication: InboundAuthenticationView {
                saml2: SamlInboundAuthView {
                    config: saml,
                    metadata_endpoint: ctx.saml_metadata_endpoint.clone(),
                },
                passive_sts: PassiveStsInboundAuthView {
                    config: passive_sts,
                    passive_sts_url: ctx.passive_sts_url.clone(),
                },
            },
            realm_config: RealmConfig::from(ctx),
        })
    }

    /// Client view of one domain
    pub async fn read_domain(&self, ctx: &TenantContext, domain_id: &str) -> Result<Value> {
        let handler = ConfigDomainRegistry::lookup(domain_id)?;
        let current = self.load(ctx, handler).await?;
        debug!(tenant = %ctx.domain, domain = %handler.domain(), "Read domain");
        handler.view(&current, ctx)
    }

    /// Typed current value of one domain
    pub async fn read_record<R: DomainRecord>(&self, ctx: &TenantContext) -> Result<R> {
        let current = self.load(ctx, ConfigDomainRegistry::handler(R::DOMAIN)).await?;
        serde_json::from_value(current).map_err(|e| AppError::Internal(e.into()))
    }

    pub async fn get_authenticator(&self, ctx: &TenantContext, id: &str) -> Result<Authenticator> {
        let authenticators = self.read_record::<AuthenticatorsConfig>(ctx).await?;
        authenticators
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Authenticator '{}' not found", id)))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Load, patch, validate and write one domain; returns the new client view
    pub async fn patch_domain(
        &self,
        ctx: &TenantContext,
        domain_id: &str,
        ops: &[PatchOperation],
    ) -> Result<Value> {
        let handler = ConfigDomainRegistry::lookup(domain_id)?;
        let domain = handler.domain();
        require_operations(ops)?;

        let _guard = self.locks.acquire(ctx.tenant_id, domain).await;
        let current = self.load(ctx, handler).await?;
        let vctx = self.validation_context(ctx, &[domain]).await?;

        let candidate = handler.patch(&current, ops, &vctx).map_err(|e| {
            warn!(tenant = %ctx.domain, domain = %domain, ops = ops.len(), error = %e, "Patch rejected");
            record_patch(domain.as_str(), false);
            e
        })?;

        self.write(ctx, domain, &candidate, "patch").await?;
        record_patch(domain.as_str(), true);
        handler.view(&candidate, ctx)
    }

    /// Patch the top-level session and home realm fields of the composite view.
    ///
    /// Every affected domain is patched and validated before any is written.
    pub async fn patch_server_configs(
        &self,
        ctx: &TenantContext,
        ops: &[PatchOperation],
    ) -> Result<ServerConfiguration> {
        require_operations(ops)?;

        let mut grouped: BTreeMap<ConfigDomain, Vec<PatchOperation>> = BTreeMap::new();
        for op in ops {
            let domain = ConfigDomainRegistry::owner_of_composite_path(&op.path).ok_or_else(|| {
                AppError::InvalidPatchOperation(format!(
                    "Path '{}' is not patchable on the server configuration",
                    op.path
                ))
            })?;
            grouped.entry(domain).or_default().push(op.clone());
        }

        let domains: Vec<ConfigDomain> = grouped.keys().copied().collect();
        let guards = self.locks.acquire_all(ctx.tenant_id, &domains).await;
        let vctx = self.validation_context(ctx, &domains).await?;

        let mut staged = Vec::with_capacity(grouped.len());
        for (domain, domain_ops) in &grouped {
            let handler = ConfigDomainRegistry::handler(*domain);
            let current = self.load(ctx, handler).await?;
            match handler.patch(&current, domain_ops, &vctx) {
                Ok(candidate) => staged.push((*domain, candidate)),
                Err(e) => {
                    warn!(tenant = %ctx.domain, domain = %domain, error = %e, "Patch rejected");
                    record_patch(domain.as_str(), false);
                    return Err(e);
                }
            }
        }

        for (domain, candidate) in &staged {
            self.write(ctx, *domain, candidate, "patch").await?;
            record_patch(domain.as_str(), true);
        }
        drop(guards);

        self.read_all(ctx).await
    }

    /// Validate and write a full replacement value
    pub async fn replace_domain(
        &self,
        ctx: &TenantContext,
        domain_id: &str,
        value: Value,
    ) -> Result<Value> {
        let handler = ConfigDomainRegistry::lookup(domain_id)?;
        let domain = handler.domain();

        let _guard = self.locks.acquire(ctx.tenant_id, domain).await;
        let vctx = self.validation_context(ctx, &[domain]).await?;
        let candidate = handler.replace(value, &vctx).map_err(|e| {
            warn!(tenant = %ctx.domain, domain = %domain, error = %e, "Replacement rejected");
            e
        })?;

        self.write(ctx, domain, &candidate, "replace").await?;
        handler.view(&candidate, ctx)
    }

    /// Write the tenant default back through the validated path
    pub async fn reset_domain(&self, ctx: &TenantContext, domain_id: &str) -> Result<Value> {
        let handler = ConfigDomainRegistry::lookup(domain_id)?;
        let domain = handler.domain();

        let _guard = self.locks.acquire(ctx.tenant_id, domain).await;
        let vctx = self.validation_context(ctx, &[domain]).await?;
        let candidate = handler.replace(handler.default_value(ctx)?, &vctx)?;

        self.write(ctx, domain, &candidate, "reset").await?;
        handler.view(&candidate, ctx)
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    async fn load(&self, ctx: &TenantContext, handler: &dyn DomainHandler) -> Result<Value> {
        let stored = self.domain_repo.get(ctx.tenant_id, handler.domain()).await?;
        handler.load(stored, ctx)
    }

    async fn write(
        &self,
        ctx: &TenantContext,
        domain: ConfigDomain,
        value: &Value,
        kind: &'static str,
    ) -> Result<()> {
        self.domain_repo.upsert(ctx.tenant_id, domain, value).await?;
        record_write(domain.as_str(), kind);
        info!(tenant = %ctx.domain, domain = %domain, kind, "Configuration updated");
        Ok(())
    }

    async fn validation_context<'a>(
        &self,
        ctx: &'a TenantContext,
        domains: &[ConfigDomain],
    ) -> Result<ValidationContext<'a>> {
        let user_stores = if domains.contains(&ConfigDomain::ScimProvisioning) {
            self.user_store_repo.list_names(ctx.tenant_id).await?
        } else {
            Vec::new()
        };
        Ok(ValidationContext::new(ctx, user_stores))
    }
}

fn require_operations(ops: &[PatchOperation]) -> Result<()> {
    if ops.is_empty() {
        return Err(AppError::InvalidPatchOperation(
            "At least one operation is required".to_string(),
        ));
    }
    Ok(())
}
