//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::catalog::CatalogError;
use crate::enrichment::EnrichmentError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Uniqueness collision (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Metadata source misbehaved or could not be reached (502)
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Metadata source kept failing (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CatalogError::NotFound(msg) => ApiError::NotFound(msg),
            CatalogError::Conflict(msg) => ApiError::Conflict(msg),
            CatalogError::Storage(e) => ApiError::Internal(format!("Database error: {}", e)),
            CatalogError::Enrichment(e) => e.into(),
        }
    }
}

impl From<EnrichmentError> for ApiError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::InvalidInput(_) => ApiError::BadRequest(err.to_string()),
            EnrichmentError::UpstreamUnavailable { .. } => ApiError::Unavailable(err.to_string()),
            EnrichmentError::Transport(_) | EnrichmentError::UnexpectedResponse { .. } => {
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", msg),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", message);
        } else {
            debug!(status = status.as_u16(), "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
