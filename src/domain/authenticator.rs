//! Local authenticator records

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Who owns an authenticator definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DefinedBy {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AuthenticatorProperty {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Authenticator {
    #[validate(length(min = 1, message = "Authenticator id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "Authenticator name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Authenticator displayName must not be empty"))]
    pub display_name: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub properties: Vec<AuthenticatorProperty>,
    pub defined_by: DefinedBy,
}

/// Authenticator ids are the unpadded URL-safe base64 of the authenticator name.
pub fn authenticator_id(name: &str) -> String {
    URL_SAFE_NO_PAD.encode(name.as_bytes())
}

fn system_authenticator(
    name: &str,
    display_name: &str,
    properties: &[(&str, &str)],
) -> Authenticator {
    Authenticator {
        id: authenticator_id(name),
        name: name.to_string(),
        display_name: display_name.to_string(),
        is_enabled: true,
        properties: properties
            .iter()
            .map(|(key, value)| AuthenticatorProperty {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect(),
        defined_by: DefinedBy::System,
    }
}

/// Built-in authenticators present in every tenant
pub fn system_authenticators() -> Vec<Authenticator> {
    vec![
        system_authenticator(
            "BasicAuthenticator",
            "Username & Password",
            &[("ShowAuthFailureReason", "false")],
        ),
        system_authenticator("IdentifierExecutor", "Identifier First", &[]),
        system_authenticator(
            "SessionExecutor",
            "Active Sessions Limit",
            &[("MaxSessionCount", "1")],
        ),
    ]
}

/// The authenticator list of one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AuthenticatorsConfig(pub Vec<Authenticator>);

impl AuthenticatorsConfig {
    pub fn find(&self, id: &str) -> Option<&Authenticator> {
        self.0.iter().find(|a| a.id == id)
    }
}

impl Default for AuthenticatorsConfig {
    fn default() -> Self {
        Self(system_authenticators())
    }
}

impl Validate for AuthenticatorsConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        for authenticator in &self.0 {
            authenticator.validate()?;
        }
        Ok(())
    }
}
