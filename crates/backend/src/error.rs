//! Unified error handling for the API.
//!
//! Handlers return [`ApiResult`] and use `?`; this module maps every
//! failure to an HTTP status plus the `{ "success": false, "error": ... }`
//! envelope the clients expect.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::source::SourceError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Adapter failure talking to the sheet.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Invalid request data.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Anything else.
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Source(SourceError::Unavailable(e)) => {
                tracing::error!("event source unavailable: {e:#}");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Source(SourceError::SubmissionFailed(e)) => {
                tracing::error!("submission failed: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Source(SourceError::RowNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
