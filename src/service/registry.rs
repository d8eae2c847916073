//! Fixed table of configuration domains and their handlers

use super::patch::{FieldKind, FieldRef, PatchApplier};
use super::validator::{CrossCheck, DomainValidator, ValidationContext};
use crate::domain::{
    AuthenticatorsConfig, ConfigDomain, CorsConfig, HomeRealmConfig, ImpersonationConfig,
    PassiveStsInboundAuthConfig, PassiveStsInboundAuthView, PatchOperation,
    SamlInboundAuthConfig, SamlInboundAuthView, ScimProvisioningConfig, SessionConfig,
    TenantContext, DEFAULT_METADATA_VALIDITY_PERIOD,
};
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use validator::Validate;

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.into()))
}

/// A strongly-typed domain value with an enumerated set of patchable fields
pub trait DomainRecord:
    Serialize + DeserializeOwned + Validate + CrossCheck + Clone + Send + Sync + 'static
{
    const DOMAIN: ConfigDomain;

    /// Addressable top-level fields
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// System default for a tenant
    fn default_for(tenant: &TenantContext) -> Self;

    /// Map a patch path onto a field of `current`
    fn resolve(path: &str, _current: &Value, _default: &Value) -> Option<FieldRef> {
        Self::FIELDS
            .iter()
            .find(|(pointer, _)| *pointer == path)
            .map(|(pointer, kind)| FieldRef::at(pointer, *kind))
    }

    /// Client-facing representation, including derived fields
    fn to_view(&self, _tenant: &TenantContext) -> Result<Value> {
        to_json(self)
    }
}

impl DomainRecord for SessionConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::Session;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("/idleSessionTimeoutPeriod", FieldKind::Integer),
        ("/rememberMePeriod", FieldKind::Integer),
    ];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }
}

impl DomainRecord for HomeRealmConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::HomeRealmIdentifiers;
    const FIELDS: &'static [(&'static str, FieldKind)] =
        &[("/homeRealmIdentifiers", FieldKind::Collection)];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }

    fn to_view(&self, _tenant: &TenantContext) -> Result<Value> {
        to_json(&self.home_realm_identifiers)
    }
}

impl DomainRecord for AuthenticatorsConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::Authenticators;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("isEnabled", FieldKind::Bool),
        ("displayName", FieldKind::Text),
        ("properties", FieldKind::ObjectCollection),
        ("definedBy", FieldKind::ReadOnly),
        ("id", FieldKind::ReadOnly),
        ("name", FieldKind::ReadOnly),
    ];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }

    /// Paths are `/{authenticatorId}/{field}`
    fn resolve(path: &str, current: &Value, default: &Value) -> Option<FieldRef> {
        let (id, field) = path.strip_prefix('/')?.split_once('/')?;
        let kind = Self::FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)?;

        let index_of = |list: &Value| {
            list.as_array()?
                .iter()
                .position(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
        };
        let index = index_of(current)?;

        Some(FieldRef {
            pointer: format!("/{}/{}", index, field),
            default_pointer: index_of(default).map(|i| format!("/{}/{}", i, field)),
            kind,
        })
    }
}

impl DomainRecord for CorsConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::Cors;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("/allowGenericHttpRequests", FieldKind::Bool),
        ("/allowSubdomains", FieldKind::Bool),
        ("/supportedMethods", FieldKind::Collection),
        ("/supportedHeaders", FieldKind::Collection),
        ("/exposedHeaders", FieldKind::Collection),
        ("/supportsCredentials", FieldKind::Bool),
        ("/maxAge", FieldKind::Integer),
    ];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }
}

impl DomainRecord for ScimProvisioningConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::ScimProvisioning;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("/provisioningUserstore", FieldKind::Text),
        ("/enableProxyMode", FieldKind::Bool),
    ];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }
}

impl DomainRecord for ImpersonationConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::Impersonation;
    const FIELDS: &'static [(&'static str, FieldKind)] =
        &[("/enableEmailNotification", FieldKind::Bool)];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }
}

impl DomainRecord for SamlInboundAuthConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::SamlInboundAuth;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("/destinationURLs", FieldKind::Collection),
        ("/metadataValidityPeriod", FieldKind::Integer),
        ("/enableMetadataSigning", FieldKind::Bool),
        ("/metadataEndpoint", FieldKind::ReadOnly),
    ];

    fn default_for(tenant: &TenantContext) -> Self {
        Self {
            destination_urls: vec![tenant.saml_sso_url.clone()],
            metadata_validity_period: DEFAULT_METADATA_VALIDITY_PERIOD,
            enable_metadata_signing: false,
        }
    }

    fn to_view(&self, tenant: &TenantContext) -> Result<Value> {
        to_json(&SamlInboundAuthView {
            config: self.clone(),
            metadata_endpoint: tenant.saml_metadata_endpoint.clone(),
        })
    }
}

impl DomainRecord for PassiveStsInboundAuthConfig {
    const DOMAIN: ConfigDomain = ConfigDomain::PassiveStsInboundAuth;
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("/enableRequestSigning", FieldKind::Bool),
        ("/passiveSTSUrl", FieldKind::ReadOnly),
    ];

    fn default_for(_tenant: &TenantContext) -> Self {
        Self::default()
    }

    fn to_view(&self, tenant: &TenantContext) -> Result<Value> {
        to_json(&PassiveStsInboundAuthView {
            config: self.clone(),
            passive_sts_url: tenant.passive_sts_url.clone(),
        })
    }
}

/// Type-erased operations on one registered domain
pub trait DomainHandler: Send + Sync {
    fn domain(&self) -> ConfigDomain;

    /// Default value for a tenant, in stored form
    fn default_value(&self, tenant: &TenantContext) -> Result<Value>;

    /// Decode a stored value (or the default when nothing is stored) and re-encode it
    fn load(&self, stored: Option<Value>, tenant: &TenantContext) -> Result<Value>;

    /// Apply operations to `current` and validate; returns the value to write
    fn patch(
        &self,
        current: &Value,
        ops: &[PatchOperation],
        ctx: &ValidationContext<'_>,
    ) -> Result<Value>;

    /// Validate a full replacement; returns the value to write
    fn replace(&self, value: Value, ctx: &ValidationContext<'_>) -> Result<Value>;

    /// Client-facing representation of a stored-form value
    fn view(&self, current: &Value, tenant: &TenantContext) -> Result<Value>;
}

pub struct TypedHandler<T>(PhantomData<fn() -> T>);

impl<T> TypedHandler<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DomainRecord> TypedHandler<T> {
    fn decode_stored(value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Stored {} value is unreadable: {}",
                T::DOMAIN,
                e
            ))
        })
    }
}

impl<T: DomainRecord> DomainHandler for TypedHandler<T> {
    fn domain(&self) -> ConfigDomain {
        T::DOMAIN
    }

    fn default_value(&self, tenant: &TenantContext) -> Result<Value> {
        to_json(&T::default_for(tenant))
    }

    fn load(&self, stored: Option<Value>, tenant: &TenantContext) -> Result<Value> {
        match stored {
            Some(value) => to_json(&Self::decode_stored(value)?),
            None => self.default_value(tenant),
        }
    }

    fn patch(
        &self,
        current: &Value,
        ops: &[PatchOperation],
        ctx: &ValidationContext<'_>,
    ) -> Result<Value> {
        let default = self.default_value(ctx.tenant)?;
        let candidate = PatchApplier::apply(current, &default, ops, |path, working| {
            T::resolve(path, working, &default)
        })?;

        let record: T = serde_json::from_value(candidate).map_err(|e| {
            AppError::InvalidPatchOperation(format!("Patched {} value is malformed: {}", T::DOMAIN, e))
        })?;
        DomainValidator::check(&record, ctx)?;
        to_json(&record)
    }

    fn replace(&self, value: Value, ctx: &ValidationContext<'_>) -> Result<Value> {
        let record: T = serde_json::from_value(value).map_err(|e| {
            AppError::ValidationFailed(format!("Invalid {} value: {}", T::DOMAIN, e))
        })?;
        DomainValidator::check(&record, ctx)?;
        to_json(&record)
    }

    fn view(&self, current: &Value, tenant: &TenantContext) -> Result<Value> {
        Self::decode_stored(current.clone())?.to_view(tenant)
    }
}

static SESSION: TypedHandler<SessionConfig> = TypedHandler::new();
static HOME_REALM_IDENTIFIERS: TypedHandler<HomeRealmConfig> = TypedHandler::new();
static AUTHENTICATORS: TypedHandler<AuthenticatorsConfig> = TypedHandler::new();
static CORS: TypedHandler<CorsConfig> = TypedHandler::new();
static SCIM_PROVISIONING: TypedHandler<ScimProvisioningConfig> = TypedHandler::new();
static IMPERSONATION: TypedHandler<ImpersonationConfig> = TypedHandler::new();
static SAML_INBOUND_AUTH: TypedHandler<SamlInboundAuthConfig> = TypedHandler::new();
static PASSIVE_STS_INBOUND_AUTH: TypedHandler<PassiveStsInboundAuthConfig> = TypedHandler::new();

/// Single dispatch point from domain identifier to handler
pub struct ConfigDomainRegistry;

impl ConfigDomainRegistry {
    pub fn handler(domain: ConfigDomain) -> &'static dyn DomainHandler {
        match domain {
            ConfigDomain::Session => &SESSION,
            ConfigDomain::HomeRealmIdentifiers => &HOME_REALM_IDENTIFIERS,
            ConfigDomain::Authenticators => &AUTHENTICATORS,
            ConfigDomain::Cors => &CORS,
            ConfigDomain::ScimProvisioning => &SCIM_PROVISIONING,
            ConfigDomain::Impersonation => &IMPERSONATION,
            ConfigDomain::SamlInboundAuth => &SAML_INBOUND_AUTH,
            ConfigDomain::PassiveStsInboundAuth => &PASSIVE_STS_INBOUND_AUTH,
        }
    }

    /// Look up a handler by its string identifier
    pub fn lookup(domain_id: &str) -> Result<&'static dyn DomainHandler> {
        let domain: ConfigDomain = domain_id
            .parse()
            .map_err(|_| AppError::UnknownDomain(domain_id.to_string()))?;
        Ok(Self::handler(domain))
    }

    /// Domain owning a top-level field of the composite view, if patchable there
    pub fn owner_of_composite_path(path: &str) -> Option<ConfigDomain> {
        [ConfigDomain::Session, ConfigDomain::HomeRealmIdentifiers]
            .into_iter()
            .find(|domain| match domain {
                ConfigDomain::Session => SessionConfig::FIELDS.iter().any(|(p, _)| *p == path),
                _ => HomeRealmConfig::FIELDS.iter().any(|(p, _)| *p == path),
            })
    }
}
