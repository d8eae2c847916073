//! HTTP middleware for the configuration service
//!
//! - Caller tenant extractor
//! - Observability layer (request id + metrics)
//! - Error response normalization

pub mod error_response;
pub mod metrics;
pub mod tenant;

pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use tenant::CallerTenant;
