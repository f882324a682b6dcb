//! Model layer
//!
//! Structure:
//! - `resource.rs` - generic `metadata`/`spec`/`status` envelope and list pages
//! - `platform.rs` - typed specs for each platform resource kind
//! - `resource_kind.rs` - resource kind enum and API path segments
//! - `responses.rs` - flat shapes returned to the portal frontend

pub mod platform;
pub mod resource;
pub mod resource_kind;
pub mod responses;

pub use platform::*;
pub use resource::*;
pub use resource_kind::PlatformResourceKind;
pub use responses::*;
