//! Configuration management for the configuration service

use crate::domain::normalize_tenant_domain;
use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration (in-memory stores are used when absent)
    pub database: Option<DatabaseConfig>,
    /// Redis configuration (tenant lookups are not cached when absent)
    pub redis: Option<RedisConfig>,
    /// Tenancy and derived endpoint configuration
    pub tenancy: TenancyConfig,
    /// Telemetry configuration
    pub telemetry: TelemetryConfig,
    /// Run database migrations on startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Tenancy configuration used to derive per-tenant endpoints and realm names
#[derive(Debug, Clone)]
pub struct TenancyConfig {
    /// Public base URL of the identity server (e.g., https://localhost:9853)
    pub server_base_url: String,
    /// Domain name of the super tenant
    pub super_tenant_domain: String,
    /// Path prefix used for named tenants (`/{prefix}/{domain}`)
    pub tenant_path_prefix: String,
    /// Trusted header carrying the authenticated caller's tenant domain
    pub tenant_header: String,
    /// Administrative role name reported in the realm configuration
    pub admin_role: String,
    /// Everyone role name reported in the realm configuration
    pub everyone_role: String,
    /// Administrative username of the super tenant
    pub super_tenant_admin: String,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            server_base_url: "https://localhost:9853".to_string(),
            super_tenant_domain: "carbon.super".to_string(),
            tenant_path_prefix: "t".to_string(),
            tenant_header: "x-tenant-domain".to_string(),
            admin_role: "admin".to_string(),
            everyone_role: "Internal/everyone".to_string(),
            super_tenant_admin: "admin".to_string(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether the Prometheus recorder and `/metrics` endpoint are enabled
    pub metrics_enabled: bool,
    /// Whether spans are exported over OTLP
    pub tracing_enabled: bool,
    /// OTLP collector endpoint
    pub otlp_endpoint: Option<String>,
    /// Service name reported to the collector
    pub service_name: String,
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            tracing_enabled: false,
            otlp_endpoint: None,
            service_name: "configs-core".to_string(),
            log_format: "text".to_string(),
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|s| s.to_lowercase() == "true")
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = TenancyConfig::default();

        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "9443".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: match env::var("DATABASE_URL") {
                Ok(url) => Some(DatabaseConfig {
                    url,
                    max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                        .unwrap_or_else(|_| "10".to_string())
                        .parse()
                        .unwrap_or(10),
                    min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                        .unwrap_or_else(|_| "2".to_string())
                        .parse()
                        .unwrap_or(2),
                }),
                Err(_) => None,
            },
            redis: env::var("REDIS_URL").ok().map(|url| RedisConfig { url }),
            tenancy: TenancyConfig {
                server_base_url: env::var("SERVER_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.server_base_url),
                super_tenant_domain: env::var("SUPER_TENANT_DOMAIN")
                    .map(|s| normalize_tenant_domain(&s))
                    .unwrap_or(defaults.super_tenant_domain),
                tenant_path_prefix: env::var("TENANT_PATH_PREFIX")
                    .map(|s| s.trim_matches('/').to_string())
                    .unwrap_or(defaults.tenant_path_prefix),
                tenant_header: env::var("TENANT_HEADER")
                    .map(|s| s.to_ascii_lowercase())
                    .unwrap_or(defaults.tenant_header),
                admin_role: env::var("REALM_ADMIN_ROLE").unwrap_or(defaults.admin_role),
                everyone_role: env::var("REALM_EVERYONE_ROLE")
                    .unwrap_or(defaults.everyone_role),
                super_tenant_admin: env::var("SUPER_TENANT_ADMIN")
                    .unwrap_or(defaults.super_tenant_admin),
            },
            telemetry: TelemetryConfig {
                metrics_enabled: env_flag("METRICS_ENABLED", true),
                tracing_enabled: env_flag("OTEL_TRACING_ENABLED", false),
                otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
                service_name: env::var("OTEL_SERVICE_NAME")
                    .unwrap_or_else(|_| "configs-core".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
            run_migrations: env_flag("RUN_MIGRATIONS", false),
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
