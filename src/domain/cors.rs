//! CORS policy record

use super::common::validate_unique_entries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// HTTP verbs accepted in `supportedMethods`
pub const HTTP_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "TRACE", "CONNECT",
];

/// Default preflight cache lifetime (seconds)
pub const DEFAULT_CORS_MAX_AGE: i64 = 3600;

lazy_static::lazy_static! {
    /// RFC 7230 token characters
    static ref HEADER_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$").unwrap();
}

fn validate_http_methods(methods: &[String]) -> Result<(), ValidationError> {
    validate_unique_entries(methods)?;
    if let Some(bad) = methods.iter().find(|m| !HTTP_METHODS.contains(&m.as_str())) {
        let mut err = ValidationError::new("invalid_http_method");
        err.message = Some(format!("Unsupported HTTP method: {}", bad).into());
        return Err(err);
    }
    Ok(())
}

fn validate_header_names(headers: &[String]) -> Result<(), ValidationError> {
    validate_unique_entries(headers)?;
    if let Some(bad) = headers.iter().find(|h| !HEADER_NAME_REGEX.is_match(h)) {
        let mut err = ValidationError::new("invalid_header_name");
        err.message = Some(format!("Invalid header name: {}", bad).into());
        return Err(err);
    }
    Ok(())
}

/// Tenant CORS policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CorsConfig {
    pub allow_generic_http_requests: bool,
    pub allow_subdomains: bool,
    #[validate(custom(function = "validate_http_methods"))]
    pub supported_methods: Vec<String>,
    #[validate(custom(function = "validate_header_names"))]
    pub supported_headers: Vec<String>,
    #[validate(custom(function = "validate_header_names"))]
    pub exposed_headers: Vec<String>,
    pub supports_credentials: bool,
    #[validate(range(min = 0, message = "maxAge must not be negative"))]
    pub max_age: i64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_generic_http_requests: true,
            allow_subdomains: false,
            supported_methods: vec!["GET".to_string(), "HEAD".to_string(), "OPTIONS".to_string()],
            supported_headers: vec![],
            exposed_headers: vec![],
            supports_credentials: false,
            max_age: DEFAULT_CORS_MAX_AGE,
        }
    }
}
