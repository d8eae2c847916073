//! Inbound authentication protocol records (SAML2 web SSO, Passive STS)

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Default SAML metadata validity period (minutes)
pub const DEFAULT_METADATA_VALIDITY_PERIOD: i64 = 60;

/// Destination URLs must be absolute http(s) URLs with a host.
fn validate_destination_urls(urls: &[String]) -> Result<(), ValidationError> {
    for raw in urls {
        let parsed = Url::parse(raw).map_err(|_| {
            let mut err = ValidationError::new("invalid_url");
            err.message = Some(format!("Invalid destination URL: {}", raw).into());
            err
        })?;

        let scheme_ok = matches!(parsed.scheme(), "http" | "https");
        if !scheme_ok || parsed.host_str().is_none() {
            let mut err = ValidationError::new("invalid_url");
            err.message = Some(format!("Destination URL must be http(s) with a host: {}", raw).into());
            return Err(err);
        }
    }
    super::common::validate_unique_entries(urls)
}

/// Stored SAML2 inbound authentication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SamlInboundAuthConfig {
    #[serde(rename = "destinationURLs")]
    #[validate(
        length(min = 1, message = "At least one destination URL is required"),
        custom(function = "validate_destination_urls")
    )]
    pub destination_urls: Vec<String>,
    #[validate(range(min = 1, message = "metadataValidityPeriod must be greater than 0"))]
    pub metadata_validity_period: i64,
    pub enable_metadata_signing: bool,
}

/// SAML2 settings as returned to clients, including the derived metadata endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SamlInboundAuthView {
    #[serde(flatten)]
    pub config: SamlInboundAuthConfig,
    pub metadata_endpoint: String,
}

/// Stored Passive STS inbound authentication settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PassiveStsInboundAuthConfig {
    pub enable_request_signing: bool,
}

/// Passive STS settings as returned to clients, including the derived endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PassiveStsInboundAuthView {
    #[serde(flatten)]
    pub config: PassiveStsInboundAuthConfig,
    #[serde(rename = "passiveSTSUrl")]
    pub passive_sts_url: String,
}

/// Inbound authentication section of the composite view
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboundAuthenticationView {
    pub saml2: SamlInboundAuthView,
    pub passive_sts: PassiveStsInboundAuthView,
}
