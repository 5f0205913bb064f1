//! Submission HTTP Routes
//!
//! CRUD, listing and CSV export for submissions of the active form.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::present::{export_csv, EXPORT_FILE_NAME};
use crate::query::{ListPage, ListParams, RawListQuery, SortOrder};
use crate::storage::Submission;
use crate::submissions::SubmissionService;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub submission: Submission,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: ListPage,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

// ==================
// Submission Routes
// ==================

/// Create submission routes
pub fn submission_routes(state: Arc<SubmissionService>) -> Router {
    Router::new()
        .route("/api/submissions", get(list_handler).post(create_handler))
        .route(
            "/api/submissions/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/api/export.csv", get(export_handler))
        .with_state(state)
}

/// Accepts only a JSON object body
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    match body? {
        Json(Value::Object(values)) => Ok(values),
        Json(_) => Err(ApiError::InvalidBody(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

// ==================
// Handlers
// ==================

async fn create_handler(
    State(service): State<Arc<SubmissionService>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let submission = service.create(object_body(body)?)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id: submission.id,
            created_at: submission.created_at,
        }),
    ))
}

async fn list_handler(
    State(service): State<Arc<SubmissionService>>,
    Query(raw): Query<RawListQuery>,
) -> Json<ListResponse> {
    let params = ListParams::parse(&raw);
    Json(ListResponse {
        success: true,
        page: service.list(&params),
    })
}

async fn get_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = service.get(&id)?;
    Ok(Json(SubmissionResponse {
        success: true,
        submission,
    }))
}

async fn update_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = service.update(&id, object_body(body)?)?;
    Ok(Json(SubmissionResponse {
        success: true,
        submission,
    }))
}

async fn delete_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    service.delete(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn export_handler(
    State(service): State<Arc<SubmissionService>>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let order = query
        .sort_order
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();
    let submissions = service.matching(query.q.as_deref(), order);
    let csv = export_csv(service.schema(), &submissions)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    ))
}
