//! In-process stores used when no database is configured, and by tests

use super::{DomainConfigRepository, TenantRepository, UserStoreRepository};
use crate::domain::{ConfigDomain, StringUuid, Tenant};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryDomainConfigRepository {
    values: RwLock<HashMap<(StringUuid, ConfigDomain), serde_json::Value>>,
    unavailable: AtomicBool,
}

impl InMemoryDomainConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a persistence error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceFailure(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DomainConfigRepository for InMemoryDomainConfigRepository {
    async fn get(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
    ) -> Result<Option<serde_json::Value>> {
        self.check_available()?;
        Ok(self.values.read().await.get(&(tenant_id, domain)).cloned())
    }

    async fn upsert(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
        value: &serde_json::Value,
    ) -> Result<()> {
        self.check_available()?;
        self.values
            .write()
            .await
            .insert((tenant_id, domain), value.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}

#[derive(Default)]
pub struct InMemoryTenantRepository {
    tenants: RwLock<HashMap<String, Tenant>>,
}

impl InMemoryTenantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, tenant: Tenant) {
        self.tenants
            .write()
            .await
            .insert(tenant.domain.clone(), tenant);
    }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>> {
        Ok(self.tenants.read().await.get(domain).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserStoreRepository {
    stores: RwLock<HashMap<StringUuid, Vec<String>>>,
}

impl InMemoryUserStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, tenant_id: StringUuid, name: impl Into<String>) {
        self.stores
            .write()
            .await
            .entry(tenant_id)
            .or_default()
            .push(name.into());
    }
}

#[async_trait]
impl UserStoreRepository for InMemoryUserStoreRepository {
    async fn list_names(&self, tenant_id: StringUuid) -> Result<Vec<String>> {
        Ok(self
            .stores
            .read()
            .await
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }
}
