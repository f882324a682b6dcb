//! Flat response shapes served to the portal frontend

use super::platform::{
    ComponentResource, DataPlaneResource, EnvironmentResource, NamespaceResource,
    ProjectResource, ReleaseBindingResource, RoleResource, WorkflowRunResource,
};
use crate::aggregate::{ComponentRef, is_binding_ready};
use crate::status::{ResourceHealth, RunStatus, TaskRecord, derive_status};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope around every successful response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub request_id: String,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ResourceHealth,
}

impl NamespaceSummary {
    pub fn from_resource(r: &NamespaceResource) -> Self {
        Self {
            name: r.name().to_string(),
            display_name: r.display_name(),
            description: r.description(),
            created_at: r.created_at(),
            status: r.health(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub namespace: String,
    pub display_name: String,
    pub description: Option<String>,
    pub deployment_pipeline: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ResourceHealth,
}

impl ProjectSummary {
    pub fn from_resource(r: &ProjectResource) -> Self {
        Self {
            name: r.name().to_string(),
            namespace: r.namespace().to_string(),
            display_name: r.display_name(),
            description: r.description(),
            deployment_pipeline: r.spec.deployment_pipeline_ref.clone(),
            created_at: r.created_at(),
            status: r.health(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub name: String,
    pub namespace: String,
    pub project_name: String,
    pub display_name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub component_type: String,
    pub auto_deploy: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ResourceHealth,
}

impl ComponentSummary {
    pub fn from_resource(r: &ComponentResource, listed_project: &str) -> Self {
        let component = r.component_ref(listed_project);
        Self {
            name: component.name,
            namespace: component.namespace,
            project_name: component.project,
            display_name: r.display_name(),
            description: r.description(),
            component_type: r.spec.component_type.clone(),
            auto_deploy: r.spec.auto_deploy,
            created_at: r.created_at(),
            status: r.health(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSummary {
    pub name: String,
    pub namespace: String,
    pub display_name: String,
    pub description: Option<String>,
    pub data_plane_ref: String,
    pub is_production: bool,
    pub dns_prefix: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ResourceHealth,
    pub deployment_count: usize,
}

impl EnvironmentSummary {
    pub fn from_resource(r: &EnvironmentResource, deployment_count: usize) -> Self {
        Self {
            name: r.name().to_string(),
            namespace: r.namespace().to_string(),
            display_name: r.display_name(),
            description: r.description(),
            data_plane_ref: r.spec.data_plane_ref.clone(),
            is_production: r.spec.is_production,
            dns_prefix: r.spec.gateway.dns_prefix.clone(),
            created_at: r.created_at(),
            status: r.health(),
            deployment_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneSummary {
    pub name: String,
    pub namespace: String,
    pub display_name: String,
    pub description: Option<String>,
    pub public_virtual_host: Option<String>,
    pub organization_virtual_host: Option<String>,
    pub registry_prefix: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ResourceHealth,
    /// Names of the environments placed on this data plane
    pub environments: Vec<String>,
    pub environment_count: usize,
}

impl DataPlaneSummary {
    pub fn from_resource(r: &DataPlaneResource, environments: Vec<String>) -> Self {
        Self {
            name: r.name().to_string(),
            namespace: r.namespace().to_string(),
            display_name: r.display_name(),
            description: r.description(),
            public_virtual_host: r.spec.gateway.public_virtual_host.clone(),
            organization_virtual_host: r.spec.gateway.organization_virtual_host.clone(),
            registry_prefix: r.spec.registry.prefix.clone(),
            created_at: r.created_at(),
            status: r.health(),
            environment_count: environments.len(),
            environments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSummary {
    pub name: String,
    pub namespace: String,
    pub project_name: String,
    pub component_name: String,
    pub environment: String,
    pub release_name: Option<String>,
    pub ready: bool,
    pub status: ResourceHealth,
}

impl BindingSummary {
    pub fn from_resource(r: &ReleaseBindingResource, listed_under: &ComponentRef) -> Self {
        let record = r.binding_record(listed_under);
        Self {
            name: r.name().to_string(),
            ready: is_binding_ready(&record),
            namespace: record.namespace_name,
            project_name: record.project_name,
            component_name: record.component_name,
            environment: record.environment,
            release_name: r.spec.release_name.clone(),
            status: r.health(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunSummary {
    pub name: String,
    pub namespace: String,
    pub project_name: String,
    pub component_name: String,
    pub workflow_name: String,
    pub status: RunStatus,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub tasks: Vec<TaskRecord>,
}

impl WorkflowRunSummary {
    pub fn from_resource(r: &WorkflowRunResource) -> Self {
        let run = &r.status.run;
        Self {
            name: r.name().to_string(),
            namespace: r.namespace().to_string(),
            project_name: r.spec.owner.project_name.clone(),
            component_name: r.spec.owner.component_name.clone(),
            workflow_name: r.spec.workflow.name.clone(),
            status: derive_status(run),
            image: r.status.image_status.image.clone(),
            created_at: r.created_at(),
            started_at: run.started_at,
            completed_at: run.completed_at,
            tasks: run.tasks.clone(),
        }
    }
}

/// Where a role is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleScope {
    Cluster,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub name: String,
    pub namespace: Option<String>,
    pub scope: RoleScope,
    pub description: Option<String>,
    pub actions: Vec<String>,
}

impl RoleSummary {
    pub fn from_resource(r: &RoleResource, scope: RoleScope) -> Self {
        let namespace = match scope {
            RoleScope::Cluster => None,
            RoleScope::Namespace => Some(r.namespace().to_string()),
        };
        Self {
            name: r.name().to_string(),
            namespace,
            scope,
            description: r.spec.description.clone().or_else(|| r.description()),
            actions: r.spec.actions.clone(),
        }
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub namespaces: usize,
    pub projects: usize,
    pub components: usize,
    pub environments: usize,
    pub data_planes: usize,
    pub deployed_components: usize,
    pub healthy_workloads: usize,
}

/// A log line returned by the observer
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default, deserialize_with = "crate::de::blank_as_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workflow_run_summary_shape() {
        let run: WorkflowRunResource = serde_json::from_value(json!({
            "metadata": {"name": "api-build-2", "namespace": "team-a"},
            "spec": {
                "workflow": {"name": "docker-build"},
                "owner": {"projectName": "shop", "componentName": "api"}
            },
            "status": {
                "conditions": [{"type": "Ready", "status": "False", "reason": "Pending"}],
                "tasks": []
            }
        }))
        .unwrap();

        let json = serde_json::to_value(WorkflowRunSummary::from_resource(&run)).unwrap();
        assert_eq!(json["name"], "api-build-2");
        assert_eq!(json["projectName"], "shop");
        assert_eq!(json["workflowName"], "docker-build");
        assert_eq!(json["status"], "Pending");
        assert!(json["completedAt"].is_null());
    }

    #[test]
    fn test_data_plane_summary_counts_environments() {
        let dp: DataPlaneResource = serde_json::from_value(json!({
            "metadata": {"name": "default", "namespace": "team-a"},
            "spec": {"gateway": {"publicVirtualHost": "apps.example.com"}},
            "status": {"conditions": [{"type": "Ready", "status": "True"}]}
        }))
        .unwrap();

        let summary =
            DataPlaneSummary::from_resource(&dp, vec!["dev".to_string(), "prod".to_string()]);
        assert_eq!(summary.environment_count, 2);
        assert_eq!(summary.status, ResourceHealth::Ready);
        assert_eq!(
            summary.public_virtual_host.as_deref(),
            Some("apps.example.com")
        );
    }

    #[test]
    fn test_role_scope() {
        let role: RoleResource = serde_json::from_value(json!({
            "metadata": {"name": "developer", "namespace": "team-a"},
            "spec": {"actions": ["component:view", "component:deploy"]}
        }))
        .unwrap();

        let cluster = RoleSummary::from_resource(&role, RoleScope::Cluster);
        assert_eq!(cluster.namespace, None);
        let namespaced = RoleSummary::from_resource(&role, RoleScope::Namespace);
        assert_eq!(namespaced.namespace.as_deref(), Some("team-a"));
        assert_eq!(namespaced.actions.len(), 2);

        let json = serde_json::to_value(&namespaced).unwrap();
        assert_eq!(json["scope"], "namespace");
    }
}
