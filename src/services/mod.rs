//! Service layer for business logic
//!
//! This module sits between the HTTP handlers and the upstream APIs. Each
//! use case fetches what it needs through `PlatformApi`, runs the pure status
//! and aggregation logic over it, and returns flat response shapes.
//!
//! Top-level listings fail as a whole when the upstream fails. Per-component
//! lookups made while counting are best-effort.

mod authz;
mod catalog;
mod dashboard;
mod infrastructure;
mod workflow;

use crate::aggregate::DEFAULT_BATCH_SIZE;
use crate::platform::{LogSource, PlatformApi};
use std::sync::Arc;

/// Portal use cases over the platform and observer APIs
#[derive(Clone)]
pub struct PortalService {
    api: Arc<dyn PlatformApi>,
    logs: Arc<dyn LogSource>,
    batch_size: usize,
}

impl PortalService {
    pub fn new(api: Arc<dyn PlatformApi>, logs: Arc<dyn LogSource>) -> Self {
        Self {
            api,
            logs,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Per-component lookups in flight at once while aggregating
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Resource builders shared by the service tests

    use crate::models::platform::*;
    use serde_json::json;

    pub fn namespace(name: &str) -> NamespaceResource {
        serde_json::from_value(json!({"metadata": {"name": name}})).unwrap()
    }

    pub fn project(ns: &str, name: &str) -> ProjectResource {
        serde_json::from_value(json!({"metadata": {"name": name, "namespace": ns}})).unwrap()
    }

    pub fn component(ns: &str, project: &str, name: &str) -> ComponentResource {
        serde_json::from_value(json!({
            "metadata": {"name": name, "namespace": ns},
            "spec": {"owner": {"projectName": project}, "type": "Service"}
        }))
        .unwrap()
    }

    pub fn environment(ns: &str, name: &str, data_plane: &str) -> EnvironmentResource {
        serde_json::from_value(json!({
            "metadata": {"name": name, "namespace": ns},
            "spec": {"dataPlaneRef": data_plane}
        }))
        .unwrap()
    }

    pub fn data_plane(ns: &str, name: &str) -> DataPlaneResource {
        serde_json::from_value(json!({"metadata": {"name": name, "namespace": ns}})).unwrap()
    }

    pub fn binding(ns: &str, component: &str, env: &str, ready: &str) -> ReleaseBindingResource {
        serde_json::from_value(json!({
            "metadata": {"name": format!("{}-{}", component, env), "namespace": ns},
            "spec": {
                "owner": {"projectName": "shop", "componentName": component},
                "environment": env
            },
            "status": {"conditions": [{"type": "Ready", "status": ready}]}
        }))
        .unwrap()
    }

    pub fn workflow_run(ns: &str, name: &str, created: &str) -> WorkflowRunResource {
        serde_json::from_value(json!({
            "metadata": {"name": name, "namespace": ns, "creationTimestamp": created},
            "spec": {
                "workflow": {"name": "docker-build"},
                "owner": {"projectName": "shop", "componentName": "api"}
            }
        }))
        .unwrap()
    }

    pub fn role(ns: Option<&str>, name: &str) -> RoleResource {
        serde_json::from_value(json!({
            "metadata": {"name": name, "namespace": ns},
            "spec": {"actions": ["component:view"]}
        }))
        .unwrap()
    }
}
