//! Application state traits for dependency injection
//!
//! Handlers are generic over these traits so the same code runs against the
//! production `AppState` and test states.

use crate::cache::CacheOperations;
use crate::config::Config;
use crate::repository::{DomainConfigRepository, TenantRepository, UserStoreRepository};
use crate::service::ConfigService;

/// State that provides the configuration service
pub trait HasConfigs: Clone + Send + Sync + 'static {
    /// The domain store type
    type DomainRepo: DomainConfigRepository + ?Sized;
    /// The tenant repository type
    type TenantRepo: TenantRepository + ?Sized;
    /// The userstore lookup type
    type UserStoreRepo: UserStoreRepository + ?Sized;
    /// The cache type (CacheManager or NoOpCacheManager)
    type Cache: CacheOperations + ?Sized;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the configuration service
    fn config_service(
        &self,
    ) -> &ConfigService<Self::DomainRepo, Self::TenantRepo, Self::UserStoreRepo, Self::Cache>;

    /// Check if the system is ready
    /// Returns (store_ok, cache_ok) tuple
    fn check_ready(&self) -> impl std::future::Future<Output = (bool, bool)> + Send;
}
