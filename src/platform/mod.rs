//! Upstream API access
//!
//! - `api.rs` - `PlatformApi` and `LogSource` traits the services depend on
//! - `client.rs` - reqwest implementation of `PlatformApi`
//! - `observer.rs` - reqwest implementation of `LogSource`
//! - `pagination.rs` - cursor loop shared by list endpoints

pub mod api;
pub mod client;
pub mod observer;
mod pagination;
mod transport;

pub use api::{LogQuery, LogSource, PlatformApi};
#[cfg(test)]
pub use api::{MockLogSource, MockPlatformApi};
pub use client::PlatformClient;
pub use observer::ObserverClient;
pub use pagination::collect_pages;
