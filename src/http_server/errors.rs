//! # HTTP API Errors
//!
//! Every error body carries `success: false`. Validation failures list one
//! message per field under `errors`; everything else has a single `message`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Event;
use crate::schema::ValidationErrors;
use crate::submissions::ServiceError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Message for any 404
pub const NOT_FOUND_MESSAGE: &str = "Submission not found";

/// Message for any 500; details only go to the log
pub const INTERNAL_MESSAGE: &str = "Unexpected server error";

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Values break the form schema
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// No submission with the requested id
    #[error("Submission not found")]
    NotFound,

    /// Body is not JSON, or not a JSON object
    #[error("{0}")]
    InvalidBody(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(errors) => Self {
                success: false,
                errors: Some(errors),
                message: None,
            },
            ApiError::Internal(_) => Self {
                success: false,
                errors: None,
                message: Some(INTERNAL_MESSAGE.to_string()),
            },
            other => Self {
                success: false,
                errors: None,
                message: Some(other.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(event = %Event::RequestFailed, error = %detail, "request failed");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
