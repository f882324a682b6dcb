//! Namespaces, projects, components, bindings and logs

use super::PortalService;
use crate::aggregate::ComponentRef;
use crate::error::PlatformResult;
use crate::models::{
    BindingSummary, ComponentSummary, LogEntry, NamespaceSummary, ProjectSummary,
};
use crate::platform::{LogQuery, PlatformApi};
use futures::future::try_join_all;

impl PortalService {
    pub async fn namespaces(&self) -> PlatformResult<Vec<NamespaceSummary>> {
        let namespaces = self.api.list_namespaces().await?;
        Ok(namespaces
            .iter()
            .map(NamespaceSummary::from_resource)
            .collect())
    }

    /// Names of every namespace
    pub async fn namespace_names(&self) -> PlatformResult<Vec<String>> {
        let namespaces = self.api.list_namespaces().await?;
        Ok(namespaces
            .iter()
            .map(|n| n.name().to_string())
            .filter(|n| !n.is_empty())
            .collect())
    }

    pub async fn projects(&self, namespace: &str) -> PlatformResult<Vec<ProjectSummary>> {
        let projects = self.api.list_projects(namespace).await?;
        Ok(projects.iter().map(ProjectSummary::from_resource).collect())
    }

    pub async fn components(
        &self,
        namespace: &str,
        project: &str,
    ) -> PlatformResult<Vec<ComponentSummary>> {
        let components = self.api.list_components(namespace, project).await?;
        Ok(components
            .iter()
            .map(|c| ComponentSummary::from_resource(c, project))
            .collect())
    }

    pub async fn bindings(&self, component: &ComponentRef) -> PlatformResult<Vec<BindingSummary>> {
        let bindings = self.api.list_release_bindings(component).await?;
        Ok(bindings
            .iter()
            .map(|b| BindingSummary::from_resource(b, component))
            .collect())
    }

    pub async fn logs(
        &self,
        component: &ComponentRef,
        query: &LogQuery,
    ) -> PlatformResult<Vec<LogEntry>> {
        self.logs.component_logs(component, query).await
    }
}

/// Every component in a namespace, across all of its projects
///
/// Listing failures are hard failures.
pub(crate) async fn component_refs(
    api: &dyn PlatformApi,
    namespace: &str,
) -> PlatformResult<Vec<ComponentRef>> {
    let projects = api.list_projects(namespace).await?;
    let per_project = try_join_all(projects.iter().map(|p| async move {
        let components = api.list_components(namespace, p.name()).await?;
        Ok::<_, crate::error::PlatformError>(
            components
                .iter()
                .map(|c| c.component_ref(p.name()))
                .collect::<Vec<_>>(),
        )
    }))
    .await?;

    Ok(per_project.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::error::PlatformError;
    use crate::platform::{MockLogSource, MockPlatformApi};
    use std::sync::Arc;

    fn service(api: MockPlatformApi) -> PortalService {
        PortalService::new(Arc::new(api), Arc::new(MockLogSource::new()))
    }

    #[tokio::test]
    async fn test_component_refs_span_projects() {
        let mut api = MockPlatformApi::new();
        api.expect_list_projects()
            .returning(|ns| Ok(vec![fixtures::project(ns, "shop"), fixtures::project(ns, "blog")]));
        api.expect_list_components().returning(|ns, project| {
            Ok(vec![
                fixtures::component(ns, project, "api"),
                fixtures::component(ns, project, "web"),
            ])
        });

        let refs = component_refs(&api, "team-a").await.unwrap();
        assert_eq!(refs.len(), 4);
        assert_eq!(refs[0], ComponentRef::new("team-a", "shop", "api"));
        assert_eq!(refs[3], ComponentRef::new("team-a", "blog", "web"));
    }

    #[tokio::test]
    async fn test_component_listing_failure_is_hard() {
        let mut api = MockPlatformApi::new();
        api.expect_list_projects()
            .returning(|ns| Ok(vec![fixtures::project(ns, "shop")]));
        api.expect_list_components().returning(|_, _| {
            Err(PlatformError::Status {
                url: "http://platform/components".to_string(),
                status: 500,
                body: String::new(),
            })
        });

        assert!(component_refs(&api, "team-a").await.is_err());
    }

    #[tokio::test]
    async fn test_bindings_carry_readiness() {
        let mut api = MockPlatformApi::new();
        api.expect_list_release_bindings().returning(|c| {
            Ok(vec![
                fixtures::binding(&c.namespace, &c.name, "dev", "True"),
                fixtures::binding(&c.namespace, &c.name, "prod", "False"),
            ])
        });

        let bindings = service(api)
            .bindings(&ComponentRef::new("team-a", "shop", "api"))
            .await
            .unwrap();
        assert_eq!(bindings.len(), 2);
        assert!(bindings[0].ready);
        assert!(!bindings[1].ready);
        assert_eq!(bindings[1].environment, "prod");
    }

    #[tokio::test]
    async fn test_namespace_names_skip_blank() {
        let mut api = MockPlatformApi::new();
        api.expect_list_namespaces()
            .returning(|| Ok(vec![fixtures::namespace("team-a"), fixtures::namespace("")]));
        let names = service(api).namespace_names().await.unwrap();
        assert_eq!(names, vec!["team-a".to_string()]);
    }

    #[tokio::test]
    async fn test_logs_pass_not_configured_through() {
        let mut logs = MockLogSource::new();
        logs.expect_component_logs()
            .returning(|_, _| Err(PlatformError::NotConfigured("observer".to_string())));
        let service = PortalService::new(Arc::new(MockPlatformApi::new()), Arc::new(logs));

        let err = service
            .logs(
                &ComponentRef::new("team-a", "shop", "api"),
                &LogQuery::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_configured());
    }
}
