//! Route handlers and request middleware

use super::AppState;
use super::errors::ApiError;
use crate::aggregate::ComponentRef;
use crate::error::PlatformResult;
use crate::models::{
    ApiEnvelope, BindingSummary, ComponentSummary, DataPlaneSummary, EnvironmentSummary,
    FleetSummary, LogEntry, NamespaceSummary, ProjectSummary, RoleSummary, WorkflowRunSummary,
};
use crate::platform::LogQuery;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query, Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub type ApiResult<T> = Result<Json<ApiEnvelope<T>>, ApiError>;

/// Request id assigned by `request_log_middleware`
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Log every request and attach its request id
///
/// The id comes from `x-request-id` when the caller sent one. It is echoed
/// back in the response header.
pub async fn request_log_middleware(mut request: Request, next: Next) -> Response {
    let rid = request_id(request.headers());
    tracing::info!(
        request_id = %rid,
        method = %request.method(),
        path = %request.uri().path(),
        "portal_api_request"
    );
    request.extensions_mut().insert(RequestId(rid.clone()));

    let mut response = next.run(request).await;
    tracing::debug!(request_id = %rid, status = %response.status(), "portal_api_response");
    if let Ok(value) = HeaderValue::from_str(&rid) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn respond<T>(rid: RequestId, result: PlatformResult<T>) -> ApiResult<T> {
    match result {
        Ok(data) => Ok(Json(ApiEnvelope {
            request_id: rid.0,
            data,
        })),
        Err(err) => {
            if err.is_not_configured() {
                tracing::debug!(request_id = %rid.0, "{}", err);
            } else {
                tracing::warn!(request_id = %rid.0, "Upstream request failed: {}", err);
            }
            Err(ApiError::from(err).with_request_id(rid.0))
        }
    }
}

/// Unwrap query parameters, answering malformed ones with the error envelope
fn query_params<T>(
    rid: &RequestId,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!(request_id = %rid.0, "Rejected query: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text()).with_request_id(rid.0.clone())
    })
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn list_namespaces(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
) -> ApiResult<Vec<NamespaceSummary>> {
    respond(rid, state.service.namespaces().await)
}

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(namespace): Path<String>,
) -> ApiResult<Vec<ProjectSummary>> {
    respond(rid, state.service.projects(&namespace).await)
}

pub async fn list_components(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path((namespace, project)): Path<(String, String)>,
) -> ApiResult<Vec<ComponentSummary>> {
    respond(rid, state.service.components(&namespace, &project).await)
}

pub async fn list_bindings(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path((namespace, project, component)): Path<(String, String, String)>,
) -> ApiResult<Vec<BindingSummary>> {
    let component = ComponentRef::new(&namespace, &project, &component);
    respond(rid, state.service.bindings(&component).await)
}

pub async fn list_workflow_runs(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path((namespace, project, component)): Path<(String, String, String)>,
) -> ApiResult<Vec<WorkflowRunSummary>> {
    let component = ComponentRef::new(&namespace, &project, &component);
    respond(rid, state.service.workflow_runs(&component).await)
}

pub async fn component_logs(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path((namespace, project, component)): Path<(String, String, String)>,
    query: Result<Query<LogQuery>, QueryRejection>,
) -> ApiResult<Vec<LogEntry>> {
    let query = query_params(&rid, query)?;
    if query.limit == Some(0) {
        return Err(ApiError::bad_request("limit must be greater than 0").with_request_id(rid.0));
    }
    let component = ComponentRef::new(&namespace, &project, &component);
    respond(rid, state.service.logs(&component, &query).await)
}

pub async fn get_workflow_run(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path((namespace, run)): Path<(String, String)>,
) -> ApiResult<WorkflowRunSummary> {
    respond(rid, state.service.workflow_run(&namespace, &run).await)
}

pub async fn list_environments(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(namespace): Path<String>,
) -> ApiResult<Vec<EnvironmentSummary>> {
    respond(rid, state.service.environments(&namespace).await)
}

pub async fn list_all_environments(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
) -> ApiResult<Vec<EnvironmentSummary>> {
    respond(rid, state.service.all_environments().await)
}

pub async fn list_data_planes(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(namespace): Path<String>,
) -> ApiResult<Vec<DataPlaneSummary>> {
    respond(rid, state.service.data_planes(&namespace).await)
}

pub async fn list_all_data_planes(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
) -> ApiResult<Vec<DataPlaneSummary>> {
    respond(rid, state.service.all_data_planes().await)
}

pub async fn list_namespace_roles(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(namespace): Path<String>,
) -> ApiResult<Vec<RoleSummary>> {
    respond(rid, state.service.namespace_roles(&namespace).await)
}

pub async fn list_cluster_roles(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
) -> ApiResult<Vec<RoleSummary>> {
    respond(rid, state.service.cluster_roles().await)
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub namespace: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> ApiResult<FleetSummary> {
    let query = query_params(&rid, query)?;
    let namespace = query.namespace.as_deref().filter(|ns| !ns.is_empty());
    respond(rid, state.service.dashboard(namespace).await)
}
