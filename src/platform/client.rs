//! HTTP client for the platform API

use super::api::PlatformApi;
use super::pagination::collect_pages;
use super::transport::{build_http_client, get_json, join_segments, parse_base_url};
use crate::aggregate::ComponentRef;
use crate::config::{PlatformConfig, parse_duration};
use crate::error::PlatformResult;
use crate::models::platform::{
    ComponentResource, DataPlaneResource, EnvironmentResource, NamespaceResource,
    ProjectResource, ReleaseBindingResource, RoleResource, WorkflowRunResource,
};
use crate::models::{ListPage, PlatformResourceKind};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

/// Platform API client
///
/// Sends the optional bearer token on every request and follows list
/// cursors until exhausted.
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    page_size: u32,
}

impl PlatformClient {
    /// Create a client from configuration
    ///
    /// When `tokenEnv` is set the named variable must exist.
    pub fn new(config: &PlatformConfig) -> anyhow::Result<Self> {
        let timeout = parse_duration(&config.timeout).context("Invalid platform.timeout")?;
        let base_url = parse_base_url(&config.base_url)
            .with_context(|| format!("Invalid platform.baseUrl: {}", config.base_url))?;

        let token = match &config.token_env {
            Some(var) => Some(std::env::var(var).with_context(|| {
                format!("Environment variable {} not set (platform.tokenEnv)", var)
            })?),
            None => None,
        };

        tracing::debug!("Created platform client for: {}", base_url);

        Ok(Self {
            http: build_http_client(timeout)?,
            base_url,
            token,
            page_size: config.page_size.max(1),
        })
    }

    /// Replace the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self, segments: &[&str]) -> PlatformResult<Url> {
        join_segments(&self.base_url, segments)
    }

    fn page_url(base: &Url, limit: u32, cursor: Option<&str>) -> Url {
        let mut url = base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }
        url
    }

    async fn list_all<T>(&self, segments: &[&str]) -> PlatformResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let base = self.endpoint(segments)?;
        collect_pages(|cursor| {
            let url = Self::page_url(&base, self.page_size, cursor.as_deref());
            get_json::<ListPage<T>>(&self.http, url, self.token.as_deref())
        })
        .await
    }

    async fn get_one<T>(&self, segments: &[&str]) -> PlatformResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(segments)?;
        get_json(&self.http, url, self.token.as_deref()).await
    }

    fn component_segments<'a>(
        component: &'a ComponentRef,
        kind: PlatformResourceKind,
    ) -> [&'a str; 7] {
        [
            PlatformResourceKind::Namespace.plural(),
            &component.namespace,
            PlatformResourceKind::Project.plural(),
            &component.project,
            PlatformResourceKind::Component.plural(),
            &component.name,
            kind.plural(),
        ]
    }
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn list_namespaces(&self) -> PlatformResult<Vec<NamespaceResource>> {
        self.list_all(&[PlatformResourceKind::Namespace.plural()])
            .await
    }

    async fn list_projects(&self, namespace: &str) -> PlatformResult<Vec<ProjectResource>> {
        self.list_all(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            PlatformResourceKind::Project.plural(),
        ])
        .await
    }

    async fn list_components(
        &self,
        namespace: &str,
        project: &str,
    ) -> PlatformResult<Vec<ComponentResource>> {
        self.list_all(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            PlatformResourceKind::Project.plural(),
            project,
            PlatformResourceKind::Component.plural(),
        ])
        .await
    }

    async fn list_environments(
        &self,
        namespace: &str,
    ) -> PlatformResult<Vec<EnvironmentResource>> {
        self.list_all(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            PlatformResourceKind::Environment.plural(),
        ])
        .await
    }

    async fn list_data_planes(&self, namespace: &str) -> PlatformResult<Vec<DataPlaneResource>> {
        self.list_all(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            PlatformResourceKind::DataPlane.plural(),
        ])
        .await
    }

    async fn list_release_bindings(
        &self,
        component: &ComponentRef,
    ) -> PlatformResult<Vec<ReleaseBindingResource>> {
        let segments = Self::component_segments(component, PlatformResourceKind::ReleaseBinding);
        self.list_all(&segments).await
    }

    async fn has_release_bindings(&self, component: &ComponentRef) -> PlatformResult<bool> {
        let segments = Self::component_segments(component, PlatformResourceKind::ReleaseBinding);
        let url = Self::page_url(&self.endpoint(&segments)?, 1, None);
        let page: ListPage<ReleaseBindingResource> =
            get_json(&self.http, url, self.token.as_deref()).await?;
        Ok(!page.items.is_empty())
    }

    async fn list_workflow_runs(
        &self,
        component: &ComponentRef,
    ) -> PlatformResult<Vec<WorkflowRunResource>> {
        let segments = Self::component_segments(component, PlatformResourceKind::WorkflowRun);
        self.list_all(&segments).await
    }

    async fn get_workflow_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> PlatformResult<WorkflowRunResource> {
        self.get_one(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            PlatformResourceKind::WorkflowRun.plural(),
            name,
        ])
        .await
    }

    async fn list_cluster_roles(&self) -> PlatformResult<Vec<RoleResource>> {
        self.list_all(&["authz", PlatformResourceKind::ClusterRole.plural()])
            .await
    }

    async fn list_namespace_roles(&self, namespace: &str) -> PlatformResult<Vec<RoleResource>> {
        self.list_all(&[
            PlatformResourceKind::Namespace.plural(),
            namespace,
            "authz",
            PlatformResourceKind::Role.plural(),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let base = Url::parse("http://platform/api/v1/namespaces").unwrap();
        let first = PlatformClient::page_url(&base, 100, None);
        assert_eq!(first.as_str(), "http://platform/api/v1/namespaces?limit=100");

        let next = PlatformClient::page_url(&base, 100, Some("abc=="));
        assert_eq!(
            next.as_str(),
            "http://platform/api/v1/namespaces?limit=100&cursor=abc%3D%3D"
        );
    }

    #[test]
    fn test_component_segments() {
        let component = ComponentRef::new("team-a", "shop", "api");
        let segments =
            PlatformClient::component_segments(&component, PlatformResourceKind::WorkflowRun);
        assert_eq!(
            segments.join("/"),
            "namespaces/team-a/projects/shop/components/api/workflow-runs"
        );
    }

    #[test]
    fn test_new_requires_token_variable() {
        let config = PlatformConfig {
            token_env: Some("PORTAL_BFF_TEST_TOKEN_THAT_IS_NEVER_SET".to_string()),
            ..PlatformConfig::default()
        };
        assert!(PlatformClient::new(&config).is_err());

        assert!(PlatformClient::new(&PlatformConfig::default()).is_ok());
    }
}
