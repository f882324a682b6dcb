//! Seams between the services and the upstream HTTP APIs

use crate::aggregate::ComponentRef;
use crate::error::PlatformResult;
use crate::models::platform::{
    ComponentResource, DataPlaneResource, EnvironmentResource, NamespaceResource,
    ProjectResource, ReleaseBindingResource, RoleResource, WorkflowRunResource,
};
use crate::models::responses::LogEntry;
use async_trait::async_trait;
use serde::Deserialize;

/// Read access to the platform API
///
/// List methods return every item across all pages. Any upstream failure is
/// a hard error; callers decide whether to propagate it or to count it as
/// zero.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn list_namespaces(&self) -> PlatformResult<Vec<NamespaceResource>>;

    async fn list_projects(&self, namespace: &str) -> PlatformResult<Vec<ProjectResource>>;

    async fn list_components(
        &self,
        namespace: &str,
        project: &str,
    ) -> PlatformResult<Vec<ComponentResource>>;

    async fn list_environments(&self, namespace: &str)
    -> PlatformResult<Vec<EnvironmentResource>>;

    async fn list_data_planes(&self, namespace: &str) -> PlatformResult<Vec<DataPlaneResource>>;

    async fn list_release_bindings(
        &self,
        component: &ComponentRef,
    ) -> PlatformResult<Vec<ReleaseBindingResource>>;

    /// Whether the component has at least one release binding
    ///
    /// Fetches a single item instead of the full list.
    async fn has_release_bindings(&self, component: &ComponentRef) -> PlatformResult<bool>;

    async fn list_workflow_runs(
        &self,
        component: &ComponentRef,
    ) -> PlatformResult<Vec<WorkflowRunResource>>;

    async fn get_workflow_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> PlatformResult<WorkflowRunResource>;

    async fn list_cluster_roles(&self) -> PlatformResult<Vec<RoleResource>>;

    async fn list_namespace_roles(&self, namespace: &str) -> PlatformResult<Vec<RoleResource>>;
}

/// Filters for a component log query
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Source of component logs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fails with `PlatformError::NotConfigured` when no backend is set up
    async fn component_logs(
        &self,
        component: &ComponentRef,
        query: &LogQuery,
    ) -> PlatformResult<Vec<LogEntry>>;
}
