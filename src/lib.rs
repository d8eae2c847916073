//! Configs Core - Server Configuration Management
//!
//! Tenant-scoped aggregation and JSON-patch style updates of an identity
//! server's configuration domains (realm, session, authenticators, CORS,
//! provisioning, and inbound authentication), exposed over a REST API.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
