//! API integration test infrastructure
//!
//! Builds the production router over in-memory stores and keeps handles on
//! the stores so tests can seed tenants and userstores or simulate outages.

pub mod configs_http_test;
pub mod cors_http_test;
pub mod health_http_test;
pub mod inbound_auth_http_test;
pub mod provisioning_http_test;
pub mod tenancy_http_test;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use configs_core::cache::NoOpCacheManager;
use configs_core::config::{Config, TelemetryConfig, TenancyConfig};
use configs_core::domain::{StringUuid, Tenant, TenantStatus};
use configs_core::repository::{
    InMemoryDomainConfigRepository, InMemoryTenantRepository, InMemoryUserStoreRepository,
};
use configs_core::server::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SUPER_TENANT: &str = "carbon.super";
pub const WSO2_TENANT: &str = "wso2.com";
pub const TENANT_HEADER: &str = "x-tenant-domain";

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: None,
        redis: None,
        tenancy: TenancyConfig::default(),
        telemetry: TelemetryConfig {
            metrics_enabled: false,
            ..TelemetryConfig::default()
        },
        run_migrations: false,
    }
}

/// Router plus the raw stores behind it
pub struct TestApp {
    pub router: Router,
    pub domains: Arc<InMemoryDomainConfigRepository>,
    pub tenants: Arc<InMemoryTenantRepository>,
    pub user_stores: Arc<InMemoryUserStoreRepository>,
}

impl TestApp {
    /// App with the super tenant (implicit) and `wso2.com` provisioned
    pub async fn new() -> Self {
        let domains = Arc::new(InMemoryDomainConfigRepository::new());
        let tenants = Arc::new(InMemoryTenantRepository::new());
        let user_stores = Arc::new(InMemoryUserStoreRepository::new());

        tenants
            .insert(Tenant {
                id: StringUuid::new_v4(),
                domain: WSO2_TENANT.to_string(),
                admin_username: format!("admin@{}", WSO2_TENANT),
                status: TenantStatus::Active,
            })
            .await;

        let state = AppState::new(
            test_config(),
            domains.clone(),
            tenants.clone(),
            user_stores.clone(),
            Arc::new(NoOpCacheManager::new()),
        );

        Self {
            router: build_router(state),
            domains,
            tenants,
            user_stores,
        }
    }

    /// Register a tenant and return its id
    pub async fn add_tenant(&self, domain: &str, status: TenantStatus) -> StringUuid {
        let id = StringUuid::new_v4();
        self.tenants
            .insert(Tenant {
                id,
                domain: domain.to_string(),
                admin_username: "admin".to_string(),
                status,
            })
            .await;
        id
    }

    pub async fn get(&self, tenant: &str, path: &str) -> (StatusCode, Value) {
        self.send(Method::GET, Some(tenant), path, None).await
    }

    pub async fn patch(&self, tenant: &str, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, Some(tenant), path, Some(body)).await
    }

    pub async fn put(&self, tenant: &str, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, Some(tenant), path, Some(body)).await
    }

    /// Make a request and parse the JSON response (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        tenant: Option<&str>,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(tenant) = tenant {
            builder = builder.header(TENANT_HEADER, tenant);
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();

        if body_bytes.is_empty() {
            return (status, Value::Null);
        }

        (
            status,
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null),
        )
    }
}

/// Whether a JSON array contains the given string
pub fn contains_str(array: &Value, item: &str) -> bool {
    array
        .as_array()
        .map(|items| items.iter().any(|v| v == item))
        .unwrap_or(false)
}
