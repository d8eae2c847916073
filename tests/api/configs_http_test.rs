//! Composite server configuration HTTP tests

use super::{contains_str, TestApp, SUPER_TENANT, WSO2_TENANT};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

const CONFIGS_PATH: &str = "/api/server/v1/configs";
const HOME_REALM_PATH: &str = "/api/server/v1/configs/home-realm-identifiers";
const AUTHENTICATORS_PATH: &str = "/api/server/v1/configs/authenticators";
const BASIC_AUTHENTICATOR_ID: &str = "QmFzaWNBdXRoZW50aWNhdG9y";

#[tokio::test]
async fn test_get_server_configs_defaults() {
    let app = TestApp::new().await;

    let (status, configs) = app.get(WSO2_TENANT, CONFIGS_PATH).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(configs["idleSessionTimeoutPeriod"], 15);
    assert_eq!(configs["rememberMePeriod"], 20160);
    assert_eq!(configs["homeRealmIdentifiers"], json!(["localhost"]));
    assert_eq!(
        configs["provisioning"]["inbound"]["scim"]["provisioningUserstore"],
        "PRIMARY"
    );
    assert_eq!(configs["cors"]["supportsCredentials"], false);
    assert_eq!(configs["impersonation"]["enableEmailNotification"], true);
    assert_eq!(
        configs["inboundAuthentication"]["saml2"]["metadataEndpoint"],
        "https://localhost:9853/t/wso2.com/identity/metadata/saml2"
    );
    assert_eq!(
        configs["inboundAuthentication"]["passiveSts"]["passiveSTSUrl"],
        "https://localhost:9853/t/wso2.com/passivests"
    );
    assert_eq!(configs["authenticators"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_realm_config_per_tenant() {
    let app = TestApp::new().await;

    let (_, super_configs) = app.get(SUPER_TENANT, CONFIGS_PATH).await;
    let (_, tenant_configs) = app.get(WSO2_TENANT, CONFIGS_PATH).await;

    assert_eq!(
        super_configs["realmConfig"],
        json!({"adminUser": "admin", "adminRole": "admin", "everyoneRole": "Internal/everyone"})
    );
    // Tenant-qualified admin usernames are reported without the domain
    assert_eq!(tenant_configs["realmConfig"]["adminUser"], "admin");
}

#[tokio::test]
async fn test_patch_session_timeouts() {
    let app = TestApp::new().await;

    let (status, configs) = app
        .patch(
            WSO2_TENANT,
            CONFIGS_PATH,
            json!([
                {"op": "replace", "path": "/idleSessionTimeoutPeriod", "value": 30},
                {"op": "replace", "path": "/rememberMePeriod", "value": 1440}
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(configs["idleSessionTimeoutPeriod"], 30);
    assert_eq!(configs["rememberMePeriod"], 1440);
}

#[tokio::test]
async fn test_home_realm_add_then_remove() {
    let app = TestApp::new().await;

    let (status, _) = app
        .patch(
            SUPER_TENANT,
            CONFIGS_PATH,
            json!([{"op": "add", "path": "/homeRealmIdentifiers", "value": "test-realm"}]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, realms) = app.get(SUPER_TENANT, HOME_REALM_PATH).await;
    assert!(contains_str(&realms, "test-realm"));

    let (status, _) = app
        .patch(
            SUPER_TENANT,
            CONFIGS_PATH,
            json!([{"op": "remove", "path": "/homeRealmIdentifiers", "value": "test-realm"}]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, realms) = app.get(SUPER_TENANT, HOME_REALM_PATH).await;
    assert!(!contains_str(&realms, "test-realm"));
    assert_eq!(realms, json!(["localhost"]));
}

#[tokio::test]
async fn test_composite_patch_is_all_or_nothing() {
    let app = TestApp::new().await;
    let (_, before) = app.get(WSO2_TENANT, CONFIGS_PATH).await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CONFIGS_PATH,
            json!([
                {"op": "add", "path": "/homeRealmIdentifiers", "value": "staged-realm"},
                {"op": "replace", "path": "/idleSessionTimeoutPeriod", "value": 0}
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");

    let (_, after) = app.get(WSO2_TENANT, CONFIGS_PATH).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_composite_patch_rejects_other_domains() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            CONFIGS_PATH,
            json!([{"op": "replace", "path": "/cors/maxAge", "value": 10}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");
}

#[tokio::test]
async fn test_empty_patch_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.patch(WSO2_TENANT, CONFIGS_PATH, json!([])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");
}

#[tokio::test]
async fn test_list_and_get_authenticator() {
    let app = TestApp::new().await;

    let (status, list) = app.get(WSO2_TENANT, AUTHENTICATORS_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], BASIC_AUTHENTICATOR_ID);

    let (status, basic) = app
        .get(
            WSO2_TENANT,
            &format!("{}/{}", AUTHENTICATORS_PATH, BASIC_AUTHENTICATOR_ID),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(basic["name"], "BasicAuthenticator");
    assert_eq!(basic["definedBy"], "SYSTEM");
    assert_eq!(basic["isEnabled"], true);
}

#[tokio::test]
async fn test_unknown_authenticator_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get(WSO2_TENANT, &format!("{}/does-not-exist", AUTHENTICATORS_PATH))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
