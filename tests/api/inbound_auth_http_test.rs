//! SAML2 and Passive STS inbound authentication HTTP tests

use super::{contains_str, TestApp, SUPER_TENANT, WSO2_TENANT};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

const SAML_PATH: &str = "/api/server/v1/configs/authentication/inbound/saml2";
const PASSIVE_STS_PATH: &str = "/api/server/v1/configs/authentication/inbound/passivests";
const UPDATED_URL: &str = "https://localhost:9853/test/updated";

async fn assert_saml_update_applies(tenant: &str, default_destination: &str) {
    let app = TestApp::new().await;

    let (status, initial) = app.get(tenant, SAML_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["destinationURLs"], json!([default_destination]));

    let (status, _) = app
        .patch(
            tenant,
            SAML_PATH,
            json!([
                {"op": "replace", "path": "/metadataValidityPeriod", "value": 120},
                {"op": "replace", "path": "/enableMetadataSigning", "value": true},
                {"op": "replace", "path": "/destinationURLs", "value": [default_destination, UPDATED_URL]}
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, saml) = app.get(tenant, SAML_PATH).await;
    assert_eq!(saml["metadataValidityPeriod"], 120);
    assert_eq!(saml["enableMetadataSigning"], true);
    assert_eq!(saml["destinationURLs"].as_array().map(Vec::len), Some(2));
    assert!(contains_str(&saml["destinationURLs"], UPDATED_URL));
}

#[tokio::test]
async fn test_saml_update_super_tenant() {
    assert_saml_update_applies(SUPER_TENANT, "https://localhost:9853/samlsso").await;
}

#[tokio::test]
async fn test_saml_update_named_tenant() {
    assert_saml_update_applies(WSO2_TENANT, "https://localhost:9853/t/wso2.com/samlsso").await;
}

#[tokio::test]
async fn test_saml_metadata_endpoint_is_derived_per_tenant() {
    let app = TestApp::new().await;

    let (_, super_saml) = app.get(SUPER_TENANT, SAML_PATH).await;
    let (_, tenant_saml) = app.get(WSO2_TENANT, SAML_PATH).await;

    assert_eq!(
        super_saml["metadataEndpoint"],
        "https://localhost:9853/identity/metadata/saml2"
    );
    assert_eq!(
        tenant_saml["metadataEndpoint"],
        "https://localhost:9853/t/wso2.com/identity/metadata/saml2"
    );
}

#[tokio::test]
async fn test_saml_metadata_endpoint_is_read_only() {
    let app = TestApp::new().await;
    let (_, before) = app.get(WSO2_TENANT, SAML_PATH).await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            SAML_PATH,
            json!([{"op": "replace", "path": "/metadataEndpoint", "value": "https://evil.example.com"}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_patch_operation");

    let (_, after) = app.get(WSO2_TENANT, SAML_PATH).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_saml_rejects_empty_destinations() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            SAML_PATH,
            json!([{"op": "replace", "path": "/destinationURLs", "value": []}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_saml_rejects_malformed_destination() {
    let app = TestApp::new().await;

    let (status, body) = app
        .patch(
            WSO2_TENANT,
            SAML_PATH,
            json!([{"op": "add", "path": "/destinationURLs", "value": "not a url"}]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_passive_sts_update() {
    let app = TestApp::new().await;

    let (status, initial) = app.get(WSO2_TENANT, PASSIVE_STS_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        initial,
        json!({
            "enableRequestSigning": false,
            "passiveSTSUrl": "https://localhost:9853/t/wso2.com/passivests"
        })
    );

    let (status, patched) = app
        .patch(
            WSO2_TENANT,
            PASSIVE_STS_PATH,
            json!([{"op": "replace", "path": "/enableRequestSigning", "value": true}]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["enableRequestSigning"], true);
    assert_eq!(
        patched["passiveSTSUrl"],
        "https://localhost:9853/t/wso2.com/passivests"
    );
}

#[tokio::test]
async fn test_passive_sts_url_is_read_only() {
    let app = TestApp::new().await;

    for op in ["replace", "remove"] {
        let (status, body) = app
            .patch(
                SUPER_TENANT,
                PASSIVE_STS_PATH,
                json!([{"op": op, "path": "/passiveSTSUrl", "value": "https://evil.example.com"}]),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_patch_operation");
    }
}
