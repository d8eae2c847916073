//! Business logic layer

pub mod configs;
pub mod lock;
pub mod patch;
pub mod registry;
pub mod tenant_context;
pub mod validator;

pub use configs::ConfigService;
pub use patch::{FieldKind, FieldRef, PatchApplier};
pub use registry::{ConfigDomainRegistry, DomainHandler, DomainRecord};
pub use tenant_context::TenantResolver;
pub use validator::{DomainValidator, ValidationContext};
