//! Caller tenant extractor
//!
//! The upstream authentication layer injects the caller's tenant domain in a
//! trusted header (configurable, `x-tenant-domain` by default). Handlers take
//! [`CallerTenant`] and never read tenant identity from the path or body.

use crate::error::AppError;
use crate::state::HasConfigs;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Tenant domain of the authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerTenant(pub String);

impl<S> FromRequestParts<S> for CallerTenant
where
    S: HasConfigs,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = &state.config().tenancy.tenant_header;

        let domain = parts
            .headers
            .get(header.as_str())
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", header)))?
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("Invalid {} header", header)))?
            .trim();

        if domain.is_empty() {
            return Err(AppError::Unauthorized(format!("Empty {} header", header)));
        }

        Ok(CallerTenant(domain.to_string()))
    }
}
