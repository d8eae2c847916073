//! Server configuration API handlers
//!
//! Every route is scoped to the caller's tenant through [`CallerTenant`].

use crate::domain::{
    Authenticator, ConfigDomain, CorsConfig, ImpersonationConfig, PassiveStsInboundAuthView,
    PatchOperation, SamlInboundAuthView, ScimProvisioningConfig, ServerConfiguration,
};
use crate::error::{AppError, Result};
use crate::middleware::CallerTenant;
use crate::state::HasConfigs;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

/// Decode a patch body, reporting shape problems as patch errors
fn parse_operations(body: Value) -> Result<Vec<PatchOperation>> {
    if !body.is_array() {
        return Err(AppError::InvalidPatchOperation(
            "Patch body must be an array of operations".to_string(),
        ));
    }
    serde_json::from_value(body).map_err(|e| AppError::InvalidPatchOperation(e.to_string()))
}

async fn read_domain<S: HasConfigs>(
    state: &S,
    caller: &CallerTenant,
    domain: ConfigDomain,
) -> Result<Json<Value>> {
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(service.read_domain(&ctx, domain.as_str()).await?))
}

async fn patch_domain<S: HasConfigs>(
    state: &S,
    caller: &CallerTenant,
    domain: ConfigDomain,
    body: Value,
) -> Result<Json<Value>> {
    let ops = parse_operations(body)?;
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(service.patch_domain(&ctx, domain.as_str(), &ops).await?))
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "All configuration domains of the caller's tenant", body = ServerConfiguration),
        (status = 404, description = "Tenant not found")
    )
)]
pub async fn get_server_configs<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<ServerConfiguration>> {
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(service.read_all(&ctx).await?))
}

#[utoipa::path(
    patch,
    path = "/api/server/v1/configs",
    tag = "Server Configuration",
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "Session and home realm fields patched", body = ServerConfiguration),
        (status = 400, description = "Invalid patch operation or validation failure")
    )
)]
/// Patch session timeouts and home realm identifiers
pub async fn patch_server_configs<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<ServerConfiguration>> {
    let ops = parse_operations(body)?;
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(service.patch_server_configs(&ctx, &ops).await?))
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/authenticators",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "Local authenticators", body = Vec<Authenticator>)
    )
)]
pub async fn list_authenticators<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::Authenticators).await
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/authenticators/{id}",
    tag = "Server Configuration",
    params(
        ("id" = String, Path, description = "Authenticator id (URL-safe base64 of its name)")
    ),
    responses(
        (status = 200, description = "Authenticator", body = Authenticator),
        (status = 404, description = "Authenticator not found")
    )
)]
pub async fn get_authenticator<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Path(id): Path<String>,
) -> Result<Json<Authenticator>> {
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(service.get_authenticator(&ctx, &id).await?))
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/home-realm-identifiers",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "Home realm identifiers", body = Vec<String>)
    )
)]
pub async fn get_home_realm_identifiers<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::HomeRealmIdentifiers).await
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/cors",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "CORS policy", body = CorsConfig)
    )
)]
pub async fn get_cors<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::Cors).await
}

#[utoipa::path(
    patch,
    path = "/api/server/v1/configs/cors",
    tag = "Server Configuration",
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "Patched CORS policy", body = CorsConfig),
        (status = 400, description = "Invalid patch operation or validation failure")
    )
)]
pub async fn patch_cors<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    patch_domain(&state, &caller, ConfigDomain::Cors, body).await
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/impersonation",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "Impersonation settings", body = ImpersonationConfig)
    )
)]
pub async fn get_impersonation<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::Impersonation).await
}

#[utoipa::path(
    patch,
    path = "/api/server/v1/configs/impersonation",
    tag = "Server Configuration",
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "Patched impersonation settings", body = ImpersonationConfig),
        (status = 400, description = "Invalid patch operation or validation failure")
    )
)]
pub async fn patch_impersonation<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    patch_domain(&state, &caller, ConfigDomain::Impersonation, body).await
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/inbound-provisioning/scim",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "Inbound SCIM provisioning settings", body = ScimProvisioningConfig)
    )
)]
pub async fn get_scim<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::ScimProvisioning).await
}

#[utoipa::path(
    put,
    path = "/api/server/v1/configs/inbound-provisioning/scim",
    tag = "Server Configuration",
    request_body = ScimProvisioningConfig,
    responses(
        (status = 200, description = "Replaced SCIM provisioning settings", body = ScimProvisioningConfig),
        (status = 400, description = "Validation failure")
    )
)]
/// Full replacement; SCIM settings are not patched
pub async fn put_scim<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let service = state.config_service();
    let ctx = service.resolve_tenant(&caller.0).await?;
    Ok(Json(
        service
            .replace_domain(&ctx, ConfigDomain::ScimProvisioning.as_str(), body)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/authentication/inbound/saml2",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "SAML2 inbound authentication settings", body = SamlInboundAuthView)
    )
)]
pub async fn get_saml<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::SamlInboundAuth).await
}

#[utoipa::path(
    patch,
    path = "/api/server/v1/configs/authentication/inbound/saml2",
    tag = "Server Configuration",
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "Patched SAML2 settings", body = SamlInboundAuthView),
        (status = 400, description = "Invalid patch operation or validation failure")
    )
)]
pub async fn patch_saml<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    patch_domain(&state, &caller, ConfigDomain::SamlInboundAuth, body).await
}

#[utoipa::path(
    get,
    path = "/api/server/v1/configs/authentication/inbound/passivests",
    tag = "Server Configuration",
    responses(
        (status = 200, description = "Passive STS inbound authentication settings", body = PassiveStsInboundAuthView)
    )
)]
pub async fn get_passive_sts<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
) -> Result<Json<Value>> {
    read_domain(&state, &caller, ConfigDomain::PassiveStsInboundAuth).await
}

#[utoipa::path(
    patch,
    path = "/api/server/v1/configs/authentication/inbound/passivests",
    tag = "Server Configuration",
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "Patched Passive STS settings", body = PassiveStsInboundAuthView),
        (status = 400, description = "Invalid patch operation or validation failure")
    )
)]
pub async fn patch_passive_sts<S: HasConfigs>(
    State(state): State<S>,
    caller: CallerTenant,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    patch_domain(&state, &caller, ConfigDomain::PassiveStsInboundAuth, body).await
}
