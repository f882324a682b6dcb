//! Tests for the platform and observer HTTP clients

use httpmock::prelude::*;
use portal_bff::aggregate::ComponentRef;
use portal_bff::config::{ObserverConfig, PlatformConfig};
use portal_bff::error::PlatformError;
use portal_bff::platform::{LogQuery, LogSource, ObserverClient, PlatformApi, PlatformClient};
use serde_json::json;

fn platform_client(server: &MockServer) -> PlatformClient {
    let config = PlatformConfig {
        base_url: server.url("/api/v1"),
        page_size: 2,
        ..PlatformConfig::default()
    };
    PlatformClient::new(&config)
        .expect("build platform client")
        .with_token("test-token")
}

fn project(name: &str) -> serde_json::Value {
    json!({
        "metadata": {"name": name, "namespace": "team-a"},
        "spec": {"deploymentPipelineRef": "default"},
        "status": {"conditions": [{"type": "Ready", "status": "True"}]}
    })
}

#[tokio::test]
async fn test_list_follows_cursor_until_exhausted() {
    let server = MockServer::start_async().await;
    // Cursor-specific pages are registered before the first page
    let third = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/team-a/projects")
            .query_param("cursor", "page-3");
        then.status(200).json_body(json!({"items": [project("e")]}));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/team-a/projects")
            .query_param("cursor", "page-2");
        then.status(200)
            .json_body(json!({"items": [project("c"), project("d")], "nextCursor": "page-3"}));
    });
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/team-a/projects")
            .query_param("limit", "2")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .json_body(json!({"items": [project("a"), project("b")], "nextCursor": "page-2"}));
    });

    let projects = platform_client(&server)
        .list_projects("team-a")
        .await
        .expect("list projects");

    let names: Vec<&str> = projects.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(
        projects[0].spec.deployment_pipeline_ref.as_deref(),
        Some("default")
    );
    first.assert();
    second.assert();
    third.assert();
}

#[tokio::test]
async fn test_has_release_bindings_fetches_one_item() {
    let server = MockServer::start_async().await;
    let bindings = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/team-a/projects/shop/components/api/release-bindings")
            .query_param("limit", "1");
        then.status(200).json_body(json!({
            "items": [{"metadata": {"name": "api-dev"}, "spec": {"environment": "dev"}}],
            "nextCursor": "more"
        }));
    });

    let deployed = platform_client(&server)
        .has_release_bindings(&ComponentRef::new("team-a", "shop", "api"))
        .await
        .expect("check bindings");

    assert!(deployed);
    bindings.assert();
}

#[tokio::test]
async fn test_upstream_errors_are_classified() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/team-a/workflow-runs/missing");
        then.status(404).body("not found");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces");
        then.status(403).body("forbidden");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/authz/cluster-roles");
        then.status(200).body("not json");
    });

    let client = platform_client(&server);

    let err = client
        .get_workflow_run("team-a", "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::NotFound { .. }));

    let err = client.list_namespaces().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("forbidden"));

    let err = client.list_cluster_roles().await.unwrap_err();
    assert!(matches!(err, PlatformError::Decode { .. }));
}

#[tokio::test]
async fn test_transport_failure() {
    let config = PlatformConfig {
        // Nothing listens on the discard port
        base_url: "http://127.0.0.1:9/api/v1".to_string(),
        timeout: "2s".to_string(),
        ..PlatformConfig::default()
    };
    let client = PlatformClient::new(&config).expect("build platform client");

    let err = client.list_namespaces().await.unwrap_err();
    assert!(matches!(err, PlatformError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_workflow_run_detail() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/team-a/workflow-runs/api-build-7");
        then.status(200).json_body(json!({
            "metadata": {"name": "api-build-7", "namespace": "team-a"},
            "spec": {
                "workflow": {"name": "docker-build"},
                "owner": {"projectName": "shop", "componentName": "api"}
            },
            "status": {
                "completedAt": "2024-01-01T00:05:00Z",
                "tasks": [{"name": "build", "phase": "Failed"}]
            }
        }));
    });

    let run = platform_client(&server)
        .get_workflow_run("team-a", "api-build-7")
        .await
        .expect("get run");
    assert_eq!(run.spec.owner.component_name, "api");
    assert_eq!(
        portal_bff::derive_status(&run.status.run),
        portal_bff::RunStatus::Failed
    );
}

#[tokio::test]
async fn test_observer_logs() {
    let server = MockServer::start_async().await;
    let logs = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/logs/namespaces/team-a/projects/shop/components/api")
            .query_param("environment", "dev")
            .query_param("limit", "50");
        then.status(200).json_body(json!({
            "logs": [
                {"timestamp": "2024-01-01T00:00:00Z", "level": "INFO", "log": "listening on :8080"},
                {"log": "ready"}
            ],
            "totalCount": 2
        }));
    });

    let client = ObserverClient::new(&ObserverConfig {
        base_url: Some(server.base_url()),
        ..ObserverConfig::default()
    })
    .expect("build observer client");

    let entries = client
        .component_logs(
            &ComponentRef::new("team-a", "shop", "api"),
            &LogQuery {
                environment: Some("dev".to_string()),
                limit: Some(50),
            },
        )
        .await
        .expect("fetch logs");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].level.as_deref(), Some("INFO"));
    assert_eq!(entries[1].log, "ready");
    logs.assert();
}

#[tokio::test]
async fn test_observer_without_url_is_not_configured() {
    let client = ObserverClient::new(&ObserverConfig::default()).expect("build observer client");
    let err = client
        .component_logs(
            &ComponentRef::new("team-a", "shop", "api"),
            &LogQuery::default(),
        )
        .await
        .unwrap_err();
    assert!(err.is_not_configured());
}
