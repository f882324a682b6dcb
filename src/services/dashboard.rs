//! Fleet dashboard

use super::PortalService;
use super::catalog::component_refs;
use crate::aggregate::{
    ComponentRef, count_distinct_deployed_components, count_healthy_workloads, is_binding_ready,
};
use crate::error::{PlatformError, PlatformResult};
use crate::models::FleetSummary;
use futures::future::try_join_all;

/// Entity counts for one namespace
#[derive(Debug, Default)]
struct NamespaceInventory {
    projects: usize,
    environments: usize,
    data_planes: usize,
    components: Vec<ComponentRef>,
}

impl PortalService {
    /// Fleet counters for one namespace, or for every namespace
    ///
    /// Entity listings are hard failures. Deployed components and healthy
    /// workloads come from per-component lookups and are best-effort.
    pub async fn dashboard(&self, namespace: Option<&str>) -> PlatformResult<FleetSummary> {
        let namespaces = match namespace {
            Some(ns) => vec![ns.to_string()],
            None => self.namespace_names().await?,
        };

        let inventories =
            try_join_all(namespaces.iter().map(|ns| self.namespace_inventory(ns))).await?;

        let mut summary = FleetSummary {
            namespaces: namespaces.len(),
            ..FleetSummary::default()
        };
        let mut components = Vec::new();
        for inventory in inventories {
            summary.projects += inventory.projects;
            summary.environments += inventory.environments;
            summary.data_planes += inventory.data_planes;
            components.extend(inventory.components);
        }
        summary.components = components.len();

        let api = self.api.as_ref();
        summary.deployed_components =
            count_distinct_deployed_components(&components, self.batch_size, |c| {
                api.has_release_bindings(c)
            })
            .await;

        summary.healthy_workloads = count_healthy_workloads(
            &components,
            self.batch_size,
            |component| async move {
                let bindings = api.list_release_bindings(component).await?;
                Ok::<_, PlatformError>(
                    bindings
                        .iter()
                        .map(|b| b.binding_record(component))
                        .collect::<Vec<_>>(),
                )
            },
            is_binding_ready,
        )
        .await;

        tracing::debug!(
            "Dashboard for {} namespaces: {} components, {} deployed, {} healthy workloads",
            summary.namespaces,
            summary.components,
            summary.deployed_components,
            summary.healthy_workloads
        );

        Ok(summary)
    }

    async fn namespace_inventory(&self, namespace: &str) -> PlatformResult<NamespaceInventory> {
        let api = self.api.as_ref();
        let (projects, environments, data_planes, components) = futures::try_join!(
            api.list_projects(namespace),
            api.list_environments(namespace),
            api.list_data_planes(namespace),
            component_refs(api, namespace),
        )?;

        Ok(NamespaceInventory {
            projects: projects.len(),
            environments: environments.len(),
            data_planes: data_planes.len(),
            components,
        })
    }
}
