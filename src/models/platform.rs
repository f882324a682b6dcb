//! Typed specs for the platform resources the portal reads

use super::resource::{ConditionedStatus, Resource};
use crate::aggregate::{BindingRecord, ComponentRef};
use crate::status::{RunRecord, ready_condition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSpec {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    #[serde(default)]
    pub deployment_pipeline_ref: Option<String>,
}

/// Owner reference carried by component-scoped resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub project_name: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub component_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub owner: OwnerRef,
    #[serde(rename = "type", default, deserialize_with = "crate::de::null_as_default")]
    pub component_type: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub auto_deploy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentGateway {
    #[serde(default)]
    pub dns_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub data_plane_ref: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub is_production: bool,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub gateway: EnvironmentGateway,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneGateway {
    #[serde(default)]
    pub public_virtual_host: Option<String>,
    #[serde(default)]
    pub organization_virtual_host: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneRegistry {
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub gateway: DataPlaneGateway,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub registry: DataPlaneRegistry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseBindingSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub owner: OwnerRef,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub environment: String,
    #[serde(default)]
    pub release_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRef {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub workflow: WorkflowRef,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub owner: OwnerRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatus {
    #[serde(default)]
    pub image: Option<String>,
}

/// Status of a workflow run: the run record plus the built image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunStatus {
    #[serde(flatten)]
    pub run: RunRecord,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub image_status: ImageStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub actions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type NamespaceResource = Resource<NamespaceSpec, ConditionedStatus>;
pub type ProjectResource = Resource<ProjectSpec, ConditionedStatus>;
pub type ComponentResource = Resource<ComponentSpec, ConditionedStatus>;
pub type EnvironmentResource = Resource<EnvironmentSpec, ConditionedStatus>;
pub type DataPlaneResource = Resource<DataPlaneSpec, ConditionedStatus>;
pub type ReleaseBindingResource = Resource<ReleaseBindingSpec, ConditionedStatus>;
pub type WorkflowRunResource = Resource<WorkflowRunSpec, WorkflowRunStatus>;
pub type RoleResource = Resource<RoleSpec, ConditionedStatus>;

impl ComponentResource {
    /// Project owning this component
    ///
    /// Prefers the owner reference; falls back to the project the component
    /// was listed under.
    pub fn component_ref(&self, listed_project: &str) -> ComponentRef {
        let project = if self.spec.owner.project_name.is_empty() {
            listed_project
        } else {
            self.spec.owner.project_name.as_str()
        };
        ComponentRef::new(self.namespace(), project, self.name())
    }
}

impl ReleaseBindingResource {
    /// Reduce to a binding record, filling blank identity fields from the
    /// component the binding was listed under
    pub fn binding_record(&self, listed_under: &ComponentRef) -> BindingRecord {
        let or_listed = |value: &str, listed: &str| {
            if value.is_empty() {
                listed.to_string()
            } else {
                value.to_string()
            }
        };
        BindingRecord {
            namespace_name: or_listed(self.namespace(), &listed_under.namespace),
            project_name: or_listed(&self.spec.owner.project_name, &listed_under.project),
            component_name: or_listed(&self.spec.owner.component_name, &listed_under.name),
            environment: self.spec.environment.clone(),
            ready_condition_status: ready_condition(&self.status.conditions)
                .map(|c| c.status.clone()),
        }
    }
}
