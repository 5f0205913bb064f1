//! Observability HTTP Routes
//!
//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::submissions::SubmissionService;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub submissions: usize,
}

/// Health check route at root level
pub fn health_routes(state: Arc<SubmissionService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(service): State<Arc<SubmissionService>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        submissions: service.count(),
    };

    (StatusCode::OK, Json(response))
}
