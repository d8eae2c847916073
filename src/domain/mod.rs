//! Domain models for the configuration service

pub mod authenticator;
pub mod common;
pub mod config_domain;
pub mod cors;
pub mod inbound_auth;
pub mod patch;
pub mod provisioning;
pub mod server_config;
pub mod session;
pub mod tenant;

pub use authenticator::*;
pub use common::*;
pub use config_domain::*;
pub use cors::*;
pub use inbound_auth::*;
pub use patch::*;
pub use provisioning::*;
pub use server_config::*;
pub use session::*;
pub use tenant::*;
