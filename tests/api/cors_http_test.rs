//! CORS configuration HTTP tests

use super::{contains_str, TestApp, SUPER_TENANT, WSO2_TENANT};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

const CORS_PATH: &str = "/api/server/v1/configs/cors";

fn cors_update() -> serde_json::Value {
    json!([
        {"op": "add", "path": "/supportedMethods", "value": "POST"},
        {"op": "add", "path": "/supportedHeaders", "value": "Content-Type"},
        {"op": "add", "path": "/exposedHeaders", "value": "X-Custom-1"},
        {"op": "replace", "path": "/maxAge", "value": 3600},
        {"op": "replace", "path": "/allowGenericHttpRequests", "value": true},
        {"op": "replace", "path": "/allowSubdomains", "value": true}
    ])
}

async fn assert_cors_update_applies(tenant: &str) {
    let app = TestApp::new().await;

    let (status, initial) = app.get(tenant, CORS_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["supportsCredentials"], false);

    let (status, _) = app.patch(tenant, CORS_PATH, cors_update()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, cors) = app.get(tenant, CORS_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert!(contains_str(&cors["supportedMethods"], "POST"));
    assert!(contains_str(&cors["supportedHeaders"], "Content-Type"));
    assert!(contains_str(&cors["exposedHeaders"], "X-Custom-1"));
    assert_eq!(cors["maxAge"], 3600);
    assert_eq!(cors["allowGenericHttpRequests"], true);
    assert_eq!(cors["allowSubdomains"], true);
}

#[tokio::test]
async fn test_cors_update_super_tenant() {
    assert_cors_update_applies(SUPER_TENANT).await;
}

#[tokio::test]
async fn test_cors_update_named_tenant() {
    assert_cors_update_applies(WSO2_TENANT).await;
}

#[tokio::test]
async fn test_cors_add_existing_method_is_noop() {
    let app = TestApp::new().await;
    let (_, before) = app.get(WSO2_TENANT, CORS_PATH).await;

    let (status, after) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([{"op": "add", "path": "/supportedMethods", "value": "GET"}]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_cors_add_then_remove_restores_value() {
    let app = TestApp::new().await;
    let (_, before) = app.get(WSO2_TENANT, CORS_PATH).await;

    app.patch(
        WSO2_TENANT,
        CORS_PATH,
        json!([{"op": "add", "path": "/exposedHeaders", "value": "X-Trace"}]),
    )
    .await;
    let (status, after) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([{"op": "remove", "path": "/exposedHeaders", "value": "X-Trace"}]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_cors_invalid_op_leaves_value_unchanged() {
    let app = TestApp::new().await;
    let (_, before) = app.get(WSO2_TENANT, CORS_PATH).await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([
                {"op": "add", "path": "/supportedMethods", "value": "POST"},
                {"op": "replace", "path": "/maxAge", "value": -5}
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");

    let (_, after) = app.get(WSO2_TENANT, CORS_PATH).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_cors_unknown_path_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([{"op": "replace", "path": "/maxAgeSeconds", "value": 10}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");
}

#[tokio::test]
async fn test_cors_type_mismatch_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!([{"op": "replace", "path": "/supportsCredentials", "value": "yes"}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");
}

#[tokio::test]
async fn test_cors_body_must_be_array() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CORS_PATH,
            json!({"op": "replace", "path": "/maxAge", "value": 10}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");
}
