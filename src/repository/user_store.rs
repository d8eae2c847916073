//! Userstore lookup

use crate::domain::StringUuid;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStoreRepository: Send + Sync {
    /// Names of the secondary userstores configured for a tenant.
    ///
    /// The primary userstore is implicit and never listed.
    async fn list_names(&self, tenant_id: StringUuid) -> Result<Vec<String>>;
}

pub struct UserStoreRepositoryImpl {
    pool: MySqlPool,
}

impl UserStoreRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStoreRepository for UserStoreRepositoryImpl {
    async fn list_names(&self, tenant_id: StringUuid) -> Result<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT name
            FROM tenant_user_stores
            WHERE tenant_id = ?
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}
