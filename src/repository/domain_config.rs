//! Per-tenant configuration domain store

use crate::domain::{ConfigDomain, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainConfigRepository: Send + Sync {
    /// Stored value of one domain, `None` when the tenant still uses the default
    async fn get(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
    ) -> Result<Option<serde_json::Value>>;

    /// Insert or overwrite the stored value of one domain
    async fn upsert(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
        value: &serde_json::Value,
    ) -> Result<()>;

    /// Cheap round trip used by readiness probes
    async fn ping(&self) -> Result<()>;
}

pub struct DomainConfigRepositoryImpl {
    pool: MySqlPool,
}

impl DomainConfigRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainConfigRepository for DomainConfigRepositoryImpl {
    async fn get(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
    ) -> Result<Option<serde_json::Value>> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            r#"
            SELECT value
            FROM tenant_domain_configs
            WHERE tenant_id = ? AND domain_id = ?
            "#,
        )
        .bind(tenant_id)
        .bind(domain.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn upsert(
        &self,
        tenant_id: StringUuid,
        domain: ConfigDomain,
        value: &serde_json::Value,
    ) -> Result<()> {
        let value_json =
            serde_json::to_string(value).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO tenant_domain_configs (tenant_id, domain_id, value, updated_at)
            VALUES (?, ?, ?, NOW())
            ON DUPLICATE KEY UPDATE
                value = VALUES(value),
                updated_at = NOW()
            "#,
        )
        .bind(tenant_id)
        .bind(domain.as_str())
        .bind(&value_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
