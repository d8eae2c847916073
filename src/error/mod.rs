//! Unified error handling for the configuration service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Unknown configuration domain: {0}")]
    UnknownDomain(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid patch operation: {0}")]
    InvalidPatchOperation(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the failure originates on the server side (storage, cache, bugs)
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::PersistenceFailure(_)
                | AppError::Database(_)
                | AppError::Redis(_)
                | AppError::Internal(_)
        )
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::TenantNotFound(domain) => (
                StatusCode::NOT_FOUND,
                "tenant_not_found",
                format!("Tenant '{}' could not be resolved", domain),
            ),
            AppError::UnknownDomain(id) => (
                StatusCode::NOT_FOUND,
                "unknown_domain",
                format!("Configuration domain '{}' is not registered", id),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::InvalidPatchOperation(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_patch_operation",
                msg.clone(),
            ),
            AppError::ValidationFailed(reason) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                reason.clone(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::PersistenceFailure(msg) => {
                tracing::error!("Persistence failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_failure",
                    "The configuration store could not complete the request".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_failure",
                    "The configuration store could not complete the request".to_string(),
                )
            }
            AppError::Redis(e) => {
                tracing::error!("Redis error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "cache_error",
                    "A cache error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        });

        (status, body).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationFailed(errors.to_string())
    }
}
