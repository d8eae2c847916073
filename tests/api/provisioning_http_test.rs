//! SCIM provisioning and impersonation HTTP tests

use super::{TestApp, SUPER_TENANT, WSO2_TENANT};
use axum::http::StatusCode;
use configs_core::domain::StringUuid;
use pretty_assertions::assert_eq;
use serde_json::json;

const SCIM_PATH: &str = "/api/server/v1/configs/inbound-provisioning/scim";
const SCIM_ALIAS_PATH: &str = "/api/server/v1/configs/provisioning/inbound/scim";
const IMPERSONATION_PATH: &str = "/api/server/v1/configs/impersonation";

#[tokio::test]
async fn test_scim_defaults_to_primary() {
    let app = TestApp::new().await;

    let (status, scim) = app.get(WSO2_TENANT, SCIM_PATH).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        scim,
        json!({"provisioningUserstore": "PRIMARY", "enableProxyMode": false})
    );
}

#[tokio::test]
async fn test_scim_replace_with_primary() {
    let app = TestApp::new().await;

    let (status, scim) = app
        .put(
            SUPER_TENANT,
            SCIM_PATH,
            json!({"provisioningUserstore": "PRIMARY", "enableProxyMode": true}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(scim["enableProxyMode"], true);

    let (_, read_back) = app.get(SUPER_TENANT, SCIM_PATH).await;
    assert_eq!(read_back, scim);
}

#[tokio::test]
async fn test_scim_replace_requires_existing_userstore() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put(
            SUPER_TENANT,
            SCIM_PATH,
            json!({"provisioningUserstore": "SECONDARY", "enableProxyMode": false}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_scim_replace_with_secondary_userstore() {
    let app = TestApp::new().await;
    app.user_stores.add(StringUuid::nil(), "SECONDARY").await;

    let (status, scim) = app
        .put(
            SUPER_TENANT,
            SCIM_PATH,
            json!({"provisioningUserstore": "SECONDARY", "enableProxyMode": false}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(scim["provisioningUserstore"], "SECONDARY");
}

#[tokio::test]
async fn test_scim_replace_rejects_unknown_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put(
            WSO2_TENANT,
            SCIM_PATH,
            json!({"provisioningUserstore": "PRIMARY", "enableProxyMode": false, "extra": 1}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_scim_alias_route_shares_value() {
    let app = TestApp::new().await;

    let (status, _) = app
        .put(
            WSO2_TENANT,
            SCIM_ALIAS_PATH,
            json!({"provisioningUserstore": "PRIMARY", "enableProxyMode": true}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, scim) = app.get(WSO2_TENANT, SCIM_PATH).await;
    assert_eq!(scim["enableProxyMode"], true);
}

#[tokio::test]
async fn test_impersonation_patch() {
    let app = TestApp::new().await;

    let (_, initial) = app.get(WSO2_TENANT, IMPERSONATION_PATH).await;
    assert_eq!(initial, json!({"enableEmailNotification": true}));

    let (status, patched) = app
        .patch(
            WSO2_TENANT,
            IMPERSONATION_PATH,
            json!([{"op": "replace", "path": "/enableEmailNotification", "value": false}]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched, json!({"enableEmailNotification": false}));

    let (_, read_back) = app.get(WSO2_TENANT, IMPERSONATION_PATH).await;
    assert_eq!(read_back, patched);
}

#[tokio::test]
async fn test_impersonation_remove_resets_default() {
    let app = TestApp::new().await;

    app.patch(
        WSO2_TENANT,
        IMPERSONATION_PATH,
        json!([{"op": "replace", "path": "/enableEmailNotification", "value": false}]),
    )
    .await;
    let (status, reset) = app
        .patch(
            WSO2_TENANT,
            IMPERSONATION_PATH,
            json!([{"op": "remove", "path": "/enableEmailNotification"}]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reset, json!({"enableEmailNotification": true}));
}
