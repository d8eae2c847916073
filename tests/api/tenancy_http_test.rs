//! Tenant resolution and isolation HTTP tests

use super::{TestApp, SUPER_TENANT, WSO2_TENANT};
use axum::http::{Method, StatusCode};
use configs_core::domain::TenantStatus;
use pretty_assertions::assert_eq;
use serde_json::json;

const CORS_PATH: &str = "/api/server/v1/configs/cors";

#[tokio::test]
async fn test_missing_tenant_header_is_401() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, None, CORS_PATH, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_unknown_tenant_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("nowhere.example", CORS_PATH).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "tenant_not_found");
}

#[tokio::test]
async fn test_inactive_tenant_is_404() {
    let app = TestApp::new().await;
    app.add_tenant("retired.com", TenantStatus::Inactive).await;

    let (status, body) = app.get("retired.com", CORS_PATH).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "tenant_not_found");
}

#[tokio::test]
async fn test_tenant_header_is_case_insensitive() {
    let app = TestApp::new().await;

    let (status, _) = app.get("WSO2.com", CORS_PATH).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_does_not_leak_across_tenants() {
    let app = TestApp::new().await;
    let (_, super_before) = app.get(SUPER_TENANT, CORS_PATH).await;

    let (status, _) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([
                {"op": "replace", "path": "/supportsCredentials", "value": true},
                {"op": "replace", "path": "/maxAge", "value": 60}
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, super_after) = app.get(SUPER_TENANT, CORS_PATH).await;
    let (_, tenant_after) = app.get(WSO2_TENANT, CORS_PATH).await;

    assert_eq!(super_after, super_before);
    assert_eq!(tenant_after["supportsCredentials"], true);
    assert_eq!(tenant_after["maxAge"], 60);
}

#[tokio::test]
async fn test_store_outage_is_server_error() {
    let app = TestApp::new().await;
    app.domains.set_unavailable(true);

    let (status, body) = app.get(WSO2_TENANT, CORS_PATH).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "persistence_failure");
}

#[tokio::test]
async fn test_malformed_json_body_is_json_error() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .method(Method::PATCH)
        .uri(CORS_PATH)
        .header(super::TENANT_HEADER, WSO2_TENANT)
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("[{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "bad_request");
}
