//! HTTP server for the portal frontend
//!
//! Routes are read-only. Successful responses are wrapped in
//! `{ requestId, data }`, failures in `{ requestId, error: { code, message } }`.

pub mod errors;
pub mod handlers;

use crate::config::Config;
use crate::platform::{LogSource, ObserverClient, PlatformApi, PlatformClient};
use crate::services::PortalService;
use anyhow::Context;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use errors::ApiError;
pub use handlers::{REQUEST_ID_HEADER, RequestId};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: PortalService,
}

impl AppState {
    pub fn new(service: PortalService) -> Self {
        Self { service }
    }

    /// Wire the platform and observer clients from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api: Arc<dyn PlatformApi> = Arc::new(PlatformClient::new(&config.platform)?);
        let logs: Arc<dyn LogSource> = Arc::new(ObserverClient::new(&config.observer)?);
        let service =
            PortalService::new(api, logs).with_batch_size(config.aggregation.batch_size);
        Ok(Self::new(service))
    }
}

pub fn build_router(state: AppState) -> Router {
    use handlers::*;

    const COMPONENT: &str = "/api/namespaces/{namespace}/projects/{project}/components/{component}";

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/namespaces", get(list_namespaces))
        .route("/api/namespaces/{namespace}/projects", get(list_projects))
        .route(
            "/api/namespaces/{namespace}/projects/{project}/components",
            get(list_components),
        )
        .route(&format!("{COMPONENT}/bindings"), get(list_bindings))
        .route(&format!("{COMPONENT}/workflow-runs"), get(list_workflow_runs))
        .route(&format!("{COMPONENT}/logs"), get(component_logs))
        .route(
            "/api/namespaces/{namespace}/workflow-runs/{run}",
            get(get_workflow_run),
        )
        .route(
            "/api/namespaces/{namespace}/environments",
            get(list_environments),
        )
        .route("/api/namespaces/{namespace}/dataplanes", get(list_data_planes))
        .route("/api/namespaces/{namespace}/roles", get(list_namespace_roles))
        .route("/api/environments", get(list_all_environments))
        .route("/api/dataplanes", get(list_all_data_planes))
        .route("/api/roles", get(list_cluster_roles))
        .route("/api/dashboard", get(dashboard))
        .layer(from_fn(request_log_middleware))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config
        .server
        .bind_address
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid server.bindAddress '{}'", config.server.bind_address))?;

    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind portal server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound server address")?;

    tracing::info!(
        "portal-bff listening on {} (platform: {}, observer: {})",
        local_addr,
        config.platform.base_url,
        config.observer.base_url.as_deref().unwrap_or("disabled")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("portal server exited unexpectedly")?;

    tracing::info!("portal-bff stopped");
    Ok(())
}
