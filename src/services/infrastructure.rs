//! Environments and data planes

use super::PortalService;
use super::catalog::component_refs;
use crate::aggregate::{
    BindingRecord, ComponentRef, CompositeKey, collect_bindings, count_by_environment,
    group_by_secondary_entity,
};
use crate::error::PlatformResult;
use crate::models::platform::{DataPlaneResource, EnvironmentResource};
use crate::models::{DataPlaneSummary, EnvironmentSummary};
use futures::future::try_join_all;

impl PortalService {
    /// Environments of one namespace with their deployment counts
    ///
    /// A deployment is a release binding targeting the environment. Binding
    /// lookups that fail are skipped, so counts may be low but the listing
    /// still succeeds.
    pub async fn environments(&self, namespace: &str) -> PlatformResult<Vec<EnvironmentSummary>> {
        self.environments_in(&[namespace.to_string()]).await
    }

    /// Environments across every namespace, in namespace order
    pub async fn all_environments(&self) -> PlatformResult<Vec<EnvironmentSummary>> {
        let namespaces = self.namespace_names().await?;
        self.environments_in(&namespaces).await
    }

    /// Listings run per namespace; binding lookups for every component of
    /// every namespace share one batched pass.
    async fn environments_in(
        &self,
        namespaces: &[String],
    ) -> PlatformResult<Vec<EnvironmentSummary>> {
        let api = self.api.as_ref();
        let per_namespace = try_join_all(namespaces.iter().map(|ns| async move {
            futures::try_join!(api.list_environments(ns), component_refs(api, ns))
        }))
        .await?;

        let mut environments = Vec::new();
        let mut components = Vec::new();
        for (ns, (envs, refs)) in namespaces.iter().zip(per_namespace) {
            environments.extend(envs.into_iter().map(|env| (ns.as_str(), env)));
            components.extend(refs);
        }

        let bindings = self.binding_records(&components).await;
        let counts = count_by_environment(&bindings);

        Ok(environments
            .iter()
            .map(|(ns, env)| {
                let key = CompositeKey::new(ns, env.name());
                EnvironmentSummary::from_resource(env, counts.get(&key).copied().unwrap_or(0))
            })
            .collect())
    }

    /// Data planes of one namespace with the environments placed on them
    pub async fn data_planes(&self, namespace: &str) -> PlatformResult<Vec<DataPlaneSummary>> {
        let (data_planes, environments) = self.data_planes_and_environments(namespace).await?;
        Ok(summarize_data_planes(&data_planes, environments))
    }

    /// Data planes across every namespace
    ///
    /// Environments are matched to data planes by `namespace/name`, so two
    /// namespaces sharing a data plane name keep separate environment lists.
    pub async fn all_data_planes(&self) -> PlatformResult<Vec<DataPlaneSummary>> {
        let namespaces = self.namespace_names().await?;
        let per_namespace = try_join_all(
            namespaces
                .iter()
                .map(|ns| self.data_planes_and_environments(ns)),
        )
        .await?;

        let mut data_planes = Vec::new();
        let mut environments = Vec::new();
        for (dps, envs) in per_namespace {
            data_planes.extend(dps);
            environments.extend(envs);
        }
        Ok(summarize_data_planes(&data_planes, environments))
    }

    async fn data_planes_and_environments(
        &self,
        namespace: &str,
    ) -> PlatformResult<(Vec<(String, DataPlaneResource)>, Vec<(String, EnvironmentResource)>)>
    {
        let (data_planes, environments) = futures::try_join!(
            self.api.list_data_planes(namespace),
            self.api.list_environments(namespace)
        )?;
        let tag = |ns: &str| ns.to_string();
        Ok((
            data_planes.into_iter().map(|d| (tag(namespace), d)).collect(),
            environments.into_iter().map(|e| (tag(namespace), e)).collect(),
        ))
    }

    /// Best-effort binding records for the given components
    pub(crate) async fn binding_records(&self, components: &[ComponentRef]) -> Vec<BindingRecord> {
        let api = self.api.as_ref();
        collect_bindings(components, self.batch_size, |component| async move {
            let bindings = api.list_release_bindings(component).await?;
            Ok::<_, crate::error::PlatformError>(
                bindings
                    .iter()
                    .map(|b| b.binding_record(component))
                    .collect::<Vec<_>>(),
            )
        })
        .await
    }
}

/// Attach environment names to each data plane
///
/// Both inputs are tagged with the namespace they were listed under.
fn summarize_data_planes(
    data_planes: &[(String, DataPlaneResource)],
    environments: Vec<(String, EnvironmentResource)>,
) -> Vec<DataPlaneSummary> {
    let by_data_plane = group_by_secondary_entity(environments, |(ns, env)| {
        CompositeKey::new(ns, &env.spec.data_plane_ref)
    });

    data_planes
        .iter()
        .map(|(ns, dp)| {
            let names = by_data_plane
                .get(&CompositeKey::new(ns, dp.name()))
                .map(|envs| envs.iter().map(|(_, e)| e.name().to_string()).collect())
                .unwrap_or_default();
            DataPlaneSummary::from_resource(dp, names)
        })
        .collect()
}
