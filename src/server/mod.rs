//! Server initialization and routing

use crate::api;
use crate::cache::{CacheManager, CacheOperations, NoOpCacheManager};
use crate::config::Config;
use crate::migration;
use crate::openapi::ApiDoc;
use crate::repository::{
    domain_config::DomainConfigRepositoryImpl, tenant::TenantRepositoryImpl,
    user_store::UserStoreRepositoryImpl, DomainConfigRepository, InMemoryDomainConfigRepository,
    InMemoryTenantRepository, InMemoryUserStoreRepository, TenantRepository, UserStoreRepository,
};
use crate::middleware::{normalize_error_response, ObservabilityLayer};
use crate::service::ConfigService;
use crate::state::HasConfigs;
use anyhow::Result;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa_swagger_ui::SwaggerUi;

/// Configuration service with its stores chosen at startup
pub type DynConfigService = ConfigService<
    dyn DomainConfigRepository,
    dyn TenantRepository,
    dyn UserStoreRepository,
    dyn CacheOperations,
>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub config_service: Arc<DynConfigService>,
    pub cache: Arc<dyn CacheOperations>,
}

impl AppState {
    pub fn new(
        config: Config,
        domain_repo: Arc<dyn DomainConfigRepository>,
        tenant_repo: Arc<dyn TenantRepository>,
        user_store_repo: Arc<dyn UserStoreRepository>,
        cache: Arc<dyn CacheOperations>,
    ) -> Self {
        let config_service = Arc::new(ConfigService::new(
            domain_repo,
            tenant_repo,
            user_store_repo,
            cache.clone(),
            config.tenancy.clone(),
        ));

        Self {
            config: Arc::new(config),
            config_service,
            cache,
        }
    }
}

impl HasConfigs for AppState {
    type DomainRepo = dyn DomainConfigRepository;
    type TenantRepo = dyn TenantRepository;
    type UserStoreRepo = dyn UserStoreRepository;
    type Cache = dyn CacheOperations;

    fn config(&self) -> &Config {
        &self.config
    }

    fn config_service(&self) -> &DynConfigService {
        &self.config_service
    }

    async fn check_ready(&self) -> (bool, bool) {
        let store_ok = self.config_service.is_ready().await;
        let cache_ok = self.cache.ping().await.is_ok();
        (store_ok, cache_ok)
    }
}

/// Build the application state from configuration.
///
/// MySQL backs the stores when `DATABASE_URL` is set, in-memory stores
/// otherwise. Redis caches tenant lookups when `REDIS_URL` is set.
pub async fn build_state(config: Config) -> Result<AppState> {
    let (domain_repo, tenant_repo, user_store_repo): (
        Arc<dyn DomainConfigRepository>,
        Arc<dyn TenantRepository>,
        Arc<dyn UserStoreRepository>,
    ) = match &config.database {
        Some(db) => {
            if config.run_migrations {
                migration::run_migrations(db).await?;
            }

            let pool = MySqlPoolOptions::new()
                .max_connections(db.max_connections)
                .min_connections(db.min_connections)
                .connect(&db.url)
                .await?;
            info!("Connected to database");

            (
                Arc::new(DomainConfigRepositoryImpl::new(pool.clone())),
                Arc::new(TenantRepositoryImpl::new(pool.clone())),
                Arc::new(UserStoreRepositoryImpl::new(pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set, configuration is kept in memory only");
            (
                Arc::new(InMemoryDomainConfigRepository::new()),
                Arc::new(InMemoryTenantRepository::new()),
                Arc::new(InMemoryUserStoreRepository::new()),
            )
        }
    };

    let cache: Arc<dyn CacheOperations> = match &config.redis {
        Some(redis) => {
            let manager = CacheManager::new(redis).await?;
            info!("Connected to Redis");
            Arc::new(manager)
        }
        None => {
            info!("REDIS_URL not set, tenant lookups are not cached");
            Arc::new(NoOpCacheManager::new())
        }
    };

    Ok(AppState::new(
        config,
        domain_repo,
        tenant_repo,
        user_store_repo,
        cache,
    ))
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let http_addr = config.http_addr();
    let state = build_state(config).await?;

    let app = build_full_router(state, prometheus_handle);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router (health + configuration routes)
pub fn build_router<S: HasConfigs>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let scim = get(api::configs::get_scim::<S>).put(api::configs::put_scim::<S>);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // === Server configuration ===
        .route(
            "/api/server/v1/configs",
            get(api::configs::get_server_configs::<S>)
                .patch(api::configs::patch_server_configs::<S>),
        )
        .route(
            "/api/server/v1/configs/authenticators",
            get(api::configs::list_authenticators::<S>),
        )
        .route(
            "/api/server/v1/configs/authenticators/{id}",
            get(api::configs::get_authenticator::<S>),
        )
        .route(
            "/api/server/v1/configs/home-realm-identifiers",
            get(api::configs::get_home_realm_identifiers::<S>),
        )
        .route(
            "/api/server/v1/configs/cors",
            get(api::configs::get_cors::<S>).patch(api::configs::patch_cors::<S>),
        )
        .route(
            "/api/server/v1/configs/impersonation",
            get(api::configs::get_impersonation::<S>)
                .patch(api::configs::patch_impersonation::<S>),
        )
        .route("/api/server/v1/configs/inbound-provisioning/scim", scim.clone())
        .route("/api/server/v1/configs/provisioning/inbound/scim", scim)
        .route(
            "/api/server/v1/configs/authentication/inbound/saml2",
            get(api::configs::get_saml::<S>).patch(api::configs::patch_saml::<S>),
        )
        .route(
            "/api/server/v1/configs/authentication/inbound/passivests",
            get(api::configs::get_passive_sts::<S>)
                .patch(api::configs::patch_passive_sts::<S>),
        )
        // Add middleware
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the full router: API routes, `/metrics`, and Swagger UI
pub fn build_full_router<S: HasConfigs>(
    state: S,
    prometheus_handle: Option<PrometheusHandle>,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(prometheus_handle));

    build_router(state)
        .merge(metrics_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::build()))
}
