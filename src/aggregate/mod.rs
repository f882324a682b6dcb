//! Fleet aggregation
//!
//! Groups and counts entities fetched from the platform: environments per
//! data plane, deployments per environment, deployed components and healthy
//! workloads. Grouping is pure; the counting functions fan out per-component
//! lookups in bounded batches and tolerate individual failures.

mod batch;
mod fleet;
mod grouping;

pub use batch::*;
pub use fleet::*;
pub use grouping::*;
