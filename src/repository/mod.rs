//! Data access layer (Repository pattern)

pub mod domain_config;
pub mod memory;
pub mod tenant;
pub mod user_store;

pub use domain_config::DomainConfigRepository;
pub use memory::{InMemoryDomainConfigRepository, InMemoryTenantRepository, InMemoryUserStoreRepository};
pub use tenant::TenantRepository;
pub use user_store::UserStoreRepository;
