//! OpenAPI 3.0 documentation assembly
//!
//! Aggregates the handler path annotations and domain schemas into a single
//! OpenAPI specification served through Swagger UI.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Configs Core API",
        version = "0.1.0",
        description = "Tenant-scoped server configuration management API",
        license(name = "Proprietary"),
        contact(name = "Configs Team")
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "Server Configuration", description = "Realm, session, authenticator, CORS, provisioning, and inbound authentication settings"),
    ),
    components(
        schemas(
            // ── Common ─────────────────────────────────────────────────
            crate::api::health::HealthResponse,

            // ── Patch documents ────────────────────────────────────────
            crate::domain::PatchOp,
            crate::domain::PatchOperation,

            // ── Aggregate view ─────────────────────────────────────────
            crate::domain::ServerConfiguration,
            crate::domain::RealmConfig,
            crate::domain::SessionConfig,
            crate::domain::HomeRealmConfig,

            // ── Authenticators ─────────────────────────────────────────
            crate::domain::Authenticator,
            crate::domain::AuthenticatorProperty,
            crate::domain::DefinedBy,

            // ── CORS ───────────────────────────────────────────────────
            crate::domain::CorsConfig,

            // ── Provisioning ───────────────────────────────────────────
            crate::domain::ProvisioningView,
            crate::domain::InboundProvisioningView,
            crate::domain::ScimProvisioningConfig,
            crate::domain::ImpersonationConfig,

            // ── Inbound authentication ─────────────────────────────────
            crate::domain::InboundAuthenticationView,
            crate::domain::SamlInboundAuthView,
            crate::domain::PassiveStsInboundAuthView,
        )
    ),
    paths(
        // ── System ─────────────────────────────────────────────────
        crate::api::health::health,
        crate::api::health::ready,

        // ── Server Configuration ───────────────────────────────────
        crate::api::configs::get_server_configs,
        crate::api::configs::patch_server_configs,
        crate::api::configs::list_authenticators,
        crate::api::configs::get_authenticator,
        crate::api::configs::get_home_realm_identifiers,
        crate::api::configs::get_cors,
        crate::api::configs::patch_cors,
        crate::api::configs::get_impersonation,
        crate::api::configs::patch_impersonation,
        crate::api::configs::get_scim,
        crate::api::configs::put_scim,
        crate::api::configs::get_saml,
        crate::api::configs::patch_saml,
        crate::api::configs::get_passive_sts,
        crate::api::configs::patch_passive_sts,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Build the document with the caller-tenant header scheme attached
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "tenant_header".to_string(),
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("x-tenant-domain"),
                    ),
                ),
            );
        }
        doc
    }
}
