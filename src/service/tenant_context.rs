//! Caller tenant resolution

use crate::cache::CacheOperations;
use crate::config::TenancyConfig;
use crate::domain::{normalize_tenant_domain, StringUuid, Tenant, TenantContext, TenantStatus};
use crate::error::{AppError, Result};
use crate::repository::TenantRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a tenant domain into the per-call [`TenantContext`]
pub struct TenantResolver<R: ?Sized, C: ?Sized> {
    repo: Arc<R>,
    cache: Arc<C>,
    tenancy: TenancyConfig,
}

impl<R, C> TenantResolver<R, C>
where
    R: TenantRepository + ?Sized,
    C: CacheOperations + ?Sized,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>, tenancy: TenancyConfig) -> Self {
        Self {
            repo,
            cache,
            tenancy,
        }
    }

    pub async fn resolve(&self, domain: &str) -> Result<TenantContext> {
        let domain = normalize_tenant_domain(domain);
        if domain.is_empty() {
            return Err(AppError::TenantNotFound(domain));
        }

        match self.find(&domain).await? {
            Some(tenant) if tenant.status == TenantStatus::Active => {
                Ok(TenantContext::derive(&tenant, &self.tenancy))
            }
            Some(_) => {
                debug!(tenant = %domain, "Tenant is inactive");
                Err(AppError::TenantNotFound(domain))
            }
            None => Err(AppError::TenantNotFound(domain)),
        }
    }

    async fn find(&self, domain: &str) -> Result<Option<Tenant>> {
        match self.cache.get_tenant(domain).await {
            Ok(Some(tenant)) => return Ok(Some(tenant)),
            Ok(None) => {}
            Err(e) => warn!(tenant = %domain, error = %e, "Tenant cache read failed"),
        }

        let tenant = match self.repo.find_by_domain(domain).await? {
            Some(tenant) => tenant,
            None if domain == self.tenancy.super_tenant_domain => self.super_tenant(),
            None => return Ok(None),
        };

        if let Err(e) = self.cache.set_tenant(&tenant).await {
            warn!(tenant = %domain, error = %e, "Tenant cache write failed");
        }
        Ok(Some(tenant))
    }

    /// The super tenant exists even without a provisioned row
    fn super_tenant(&self) -> Tenant {
        Tenant {
            id: StringUuid::nil(),
            domain: self.tenancy.super_tenant_domain.clone(),
            admin_username: self.tenancy.super_tenant_admin.clone(),
            status: TenantStatus::Active,
        }
    }
}
