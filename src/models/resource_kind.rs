//! Platform resource kind definitions
//!
//! Centralizes the kinds served by the platform API and the path segment
//! each one is listed under.

/// Enumeration of the platform resource kinds the portal reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformResourceKind {
    Namespace,
    Project,
    Component,
    Environment,
    DataPlane,
    ReleaseBinding,
    WorkflowRun,
    Role,
    ClusterRole,
}

impl PlatformResourceKind {
    /// Path segment the platform API lists this kind under
    pub fn plural(&self) -> &'static str {
        match self {
            PlatformResourceKind::Namespace => "namespaces",
            PlatformResourceKind::Project => "projects",
            PlatformResourceKind::Component => "components",
            PlatformResourceKind::Environment => "environments",
            PlatformResourceKind::DataPlane => "dataplanes",
            PlatformResourceKind::ReleaseBinding => "release-bindings",
            PlatformResourceKind::WorkflowRun => "workflow-runs",
            PlatformResourceKind::Role => "roles",
            PlatformResourceKind::ClusterRole => "cluster-roles",
        }
    }
}
