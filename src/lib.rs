//! portal-bff library
//!
//! Backend-for-frontend between a developer portal and a platform API. It can
//! be used both as a binary and as a library for testing.
//!
//! - `status` - run status derivation and Ready-condition helpers
//! - `aggregate` - namespace-qualified grouping and best-effort fleet counts
//! - `models` - upstream resource schema and flat response shapes
//! - `platform` - platform and observer HTTP clients
//! - `services` - portal use cases
//! - `server` - axum router and handlers

pub mod aggregate;
pub mod cli;
pub mod config;
mod de;
pub mod error;
pub mod models;
pub mod platform;
pub mod server;
pub mod services;
pub mod status;

// Re-export commonly used types for convenience
pub use aggregate::{
    BindingRecord, ComponentRef, CompositeKey, count_by_environment,
    count_distinct_deployed_components, count_healthy_workloads, group_by_secondary_entity,
};
pub use error::{PlatformError, PlatformResult};
pub use status::{RunRecord, RunStatus, TaskPhase, TaskRecord, derive_status};
