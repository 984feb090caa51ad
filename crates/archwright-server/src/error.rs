//! Error types for the server crate.

use archwright_pipeline::PipelineError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors returned by API handlers and the server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The pipeline rejected or failed the request.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Failed to start the server.
    #[error("failed to start server: {0}")]
    StartupFailed(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Pipeline(PipelineError::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Pipeline(
                PipelineError::MalformedResponse { .. } | PipelineError::GenerationServiceFailure(_),
            ) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut body = json!({ "success": false, "error": self.to_string() });
        if let ApiError::Pipeline(PipelineError::MalformedResponse { raw_snippet, .. }) = &self {
            body["rawSnippet"] = json!(raw_snippet);
        }
        (status, Json(body)).into_response()
    }
}
