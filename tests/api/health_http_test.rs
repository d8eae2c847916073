//! Health and readiness endpoint tests

use super::TestApp;
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, None, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_with_memory_store() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, None, "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_when_store_unavailable() {
    let app = TestApp::new().await;
    app.domains.set_unavailable(true);

    let (status, _) = app.send(Method::GET, None, "/ready", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
