//! Session policy and home realm identifier records

use super::common::validate_unique_entries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Default idle session timeout (minutes)
pub const DEFAULT_IDLE_SESSION_TIMEOUT_PERIOD: i64 = 15;
/// Default remember-me period (minutes, two weeks)
pub const DEFAULT_REMEMBER_ME_PERIOD: i64 = 20160;
/// Home realm identifier every tenant starts with
pub const DEFAULT_HOME_REALM_IDENTIFIER: &str = "localhost";

/// Session policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionConfig {
    #[validate(range(min = 1, message = "idleSessionTimeoutPeriod must be greater than 0"))]
    pub idle_session_timeout_period: i64,
    #[validate(range(min = 1, message = "rememberMePeriod must be greater than 0"))]
    pub remember_me_period: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_session_timeout_period: DEFAULT_IDLE_SESSION_TIMEOUT_PERIOD,
            remember_me_period: DEFAULT_REMEMBER_ME_PERIOD,
        }
    }
}

/// Ordered set of home realm identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HomeRealmConfig {
    #[validate(custom(function = "validate_unique_entries"))]
    pub home_realm_identifiers: Vec<String>,
}

impl Default for HomeRealmConfig {
    fn default() -> Self {
        Self {
            home_realm_identifiers: vec![DEFAULT_HOME_REALM_IDENTIFIER.to_string()],
        }
    }
}
