//! HTTP error mapping for portal handlers

use crate::error::PlatformError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    request_id: String,
    error: ErrorBody,
}

#[derive(Clone, Debug)]
pub struct ErrorState {
    pub message: String,
    pub request_id: Option<String>,
}

impl ErrorState {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            request_id: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(ErrorState),
    Unauthorized(ErrorState),
    Forbidden(ErrorState),
    NotFound(ErrorState),
    /// Upstream failed or returned something unusable
    Upstream(ErrorState),
    /// Feature depends on a backend that is not configured
    NotConfigured(ErrorState),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(ErrorState::new(message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(ErrorState::new(message))
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(ErrorState::new(message))
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        let request_id = Some(request_id.into());
        match &mut self {
            Self::BadRequest(s)
            | Self::Unauthorized(s)
            | Self::Forbidden(s)
            | Self::NotFound(s)
            | Self::Upstream(s)
            | Self::NotConfigured(s) => s.request_id = request_id,
        }
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_argument",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Upstream(_) => "upstream_error",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        let message = err.to_string();
        match &err {
            PlatformError::NotConfigured(_) => Self::NotConfigured(ErrorState::new(message)),
            PlatformError::NotFound { .. } => Self::NotFound(ErrorState::new(message)),
            PlatformError::Status { status: 401, .. } => {
                Self::Unauthorized(ErrorState::new(message))
            }
            PlatformError::Status { status: 403, .. } => Self::Forbidden(ErrorState::new(message)),
            _ => Self::Upstream(ErrorState::new(message)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let state = match self {
            Self::BadRequest(s)
            | Self::Unauthorized(s)
            | Self::Forbidden(s)
            | Self::NotFound(s)
            | Self::Upstream(s)
            | Self::NotConfigured(s) => s,
        };
        let request_id = state
            .request_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let body = ErrorEnvelope {
            request_id,
            error: ErrorBody {
                code,
                message: state.message,
            },
        };
        (status, Json(body)).into_response()
    }
}
