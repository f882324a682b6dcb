//! Authorization roles (read only)

use super::PortalService;
use crate::error::PlatformResult;
use crate::models::{RoleScope, RoleSummary};

impl PortalService {
    pub async fn cluster_roles(&self) -> PlatformResult<Vec<RoleSummary>> {
        let roles = self.api.list_cluster_roles().await?;
        Ok(roles
            .iter()
            .map(|r| RoleSummary::from_resource(r, RoleScope::Cluster))
            .collect())
    }

    pub async fn namespace_roles(&self, namespace: &str) -> PlatformResult<Vec<RoleSummary>> {
        let roles = self.api.list_namespace_roles(namespace).await?;
        Ok(roles
            .iter()
            .map(|r| {
                let mut summary = RoleSummary::from_resource(r, RoleScope::Namespace);
                // Roles listed under a namespace belong to it even if metadata omits it
                if summary.namespace.as_deref().is_none_or(str::is_empty) {
                    summary.namespace = Some(namespace.to_string());
                }
                summary
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::platform::{MockLogSource, MockPlatformApi};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_role_scopes() {
        let mut api = MockPlatformApi::new();
        api.expect_list_cluster_roles()
            .returning(|| Ok(vec![fixtures::role(None, "platform-admin")]));
        api.expect_list_namespace_roles()
            .returning(|_| Ok(vec![fixtures::role(None, "developer")]));
        let service = PortalService::new(Arc::new(api), Arc::new(MockLogSource::new()));

        let cluster = service.cluster_roles().await.unwrap();
        assert_eq!(cluster[0].scope, RoleScope::Cluster);
        assert_eq!(cluster[0].namespace, None);

        let namespaced = service.namespace_roles("team-a").await.unwrap();
        assert_eq!(namespaced[0].scope, RoleScope::Namespace);
        assert_eq!(namespaced[0].namespace.as_deref(), Some("team-a"));
        assert_eq!(namespaced[0].actions, vec!["component:view"]);
    }
}
