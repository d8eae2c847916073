//! Redis cache layer

use crate::config::RedisConfig;
use crate::domain::Tenant;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Cache key prefixes
mod keys {
    pub const TENANT: &str = "configs:tenant";
}

/// Default TTLs
mod ttl {
    pub const TENANT_SECS: u64 = 600; // 10 minutes
}

/// Cache operations needed by the configuration service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheOperations: Send + Sync {
    async fn ping(&self) -> Result<()>;
    async fn get_tenant(&self, domain: &str) -> Result<Option<Tenant>>;
    async fn set_tenant(&self, tenant: &Tenant) -> Result<()>;
}

/// Cache manager for Redis operations
#[derive(Clone)]
pub struct CacheManager {
    conn: ConnectionManager,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to connect to Redis: {}", e))
        })?;

        Ok(Self { conn })
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(v) => {
                let parsed = serde_json::from_str(&v).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Cache deserialize error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let serialized = serde_json::to_string(value).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Cache serialize error: {}", e))
        })?;

        let _: () = conn.set_ex(key, serialized, ttl.as_secs()).await?;
        Ok(())
    }
}

fn tenant_key(domain: &str) -> String {
    format!("{}:{}", keys::TENANT, domain)
}

#[async_trait]
impl CacheOperations for CacheManager {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get_tenant(&self, domain: &str) -> Result<Option<Tenant>> {
        self.get(&tenant_key(domain)).await
    }

    async fn set_tenant(&self, tenant: &Tenant) -> Result<()> {
        self.set(
            &tenant_key(&tenant.domain),
            tenant,
            Duration::from_secs(ttl::TENANT_SECS),
        )
        .await
    }
}

/// Cache that never stores anything; used when Redis is not configured
#[derive(Clone, Default)]
pub struct NoOpCacheManager;

impl NoOpCacheManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheOperations for NoOpCacheManager {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn get_tenant(&self, _domain: &str) -> Result<Option<Tenant>> {
        Ok(None)
    }

    async fn set_tenant(&self, _tenant: &Tenant) -> Result<()> {
        Ok(())
    }
}
