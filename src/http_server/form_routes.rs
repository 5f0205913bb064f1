//! Form HTTP Routes
//!
//! The form schema as JSON, plus the server-rendered pages:
//! - `GET /`: the entry form
//! - `POST /`: urlencoded form post, validated like the JSON API
//! - `GET /submissions`: one page of the submissions table
//! - `GET /submissions/:id`: detail view
//! - `GET|POST /submissions/:id/edit`: editor
//! - `POST /submissions/:id/delete`: delete, then back to the table

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;

use crate::query::{ListParams, RawListQuery};
use crate::render::{
    render_detail, render_editor, render_form, render_not_found, render_submissions, FormState,
    SubmitOutcome, SUBMISSIONS_PATH,
};
use crate::schema::FormSchema;
use crate::submissions::{ServiceError, SubmissionService};

#[derive(Debug, Serialize)]
pub struct SchemaResponse<'a> {
    pub success: bool,
    pub schema: &'a FormSchema,
}

/// Create form and page routes
pub fn form_routes(state: Arc<SubmissionService>) -> Router {
    Router::new()
        .route("/api/form-schema", get(schema_handler))
        .route("/", get(form_page_handler).post(form_post_handler))
        .route(SUBMISSIONS_PATH, get(submissions_page_handler))
        .route("/submissions/:id", get(detail_page_handler))
        .route(
            "/submissions/:id/edit",
            get(edit_page_handler).post(edit_post_handler),
        )
        .route("/submissions/:id/delete", post(delete_post_handler))
        .with_state(state)
}

async fn schema_handler(State(service): State<Arc<SubmissionService>>) -> Response {
    Json(SchemaResponse {
        success: true,
        schema: service.schema(),
    })
    .into_response()
}

async fn form_page_handler(State(service): State<Arc<SubmissionService>>) -> Html<String> {
    Html(render_form(&FormState::new(service.compiled().clone())))
}

async fn form_post_handler(
    State(service): State<Arc<SubmissionService>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let mut form = FormState::new(service.compiled().clone());
    form.apply_pairs(&pairs);

    match form.submit(service.as_ref()) {
        SubmitOutcome::Saved {
            redirect: Some(to), ..
        } => Redirect::to(to).into_response(),
        SubmitOutcome::Saved { .. } => Html(render_form(&form)).into_response(),
        SubmitOutcome::Invalid | SubmitOutcome::Failed => {
            (StatusCode::UNPROCESSABLE_ENTITY, Html(render_form(&form))).into_response()
        }
    }
}

async fn submissions_page_handler(
    State(service): State<Arc<SubmissionService>>,
    Query(raw): Query<RawListQuery>,
) -> Html<String> {
    let params = ListParams::parse(&raw);
    let page = service.list(&params);
    Html(render_submissions(service.schema(), &page, &params))
}

fn not_found_page(err: ServiceError) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render_not_found(&err.first_message())),
    )
        .into_response()
}

async fn detail_page_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get(&id) {
        Ok(submission) => Html(render_detail(service.schema(), &submission)).into_response(),
        Err(err) => not_found_page(err),
    }
}

async fn edit_page_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get(&id) {
        Ok(submission) => {
            let form = FormState::for_submission(service.compiled().clone(), &submission);
            Html(render_editor(&form, &submission)).into_response()
        }
        Err(err) => not_found_page(err),
    }
}

async fn edit_post_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let stored = match service.get(&id) {
        Ok(submission) => submission,
        Err(err) => return not_found_page(err),
    };
    let mut form = FormState::for_submission(service.compiled().clone(), &stored);
    form.apply_pairs(&pairs);

    match form.submit(service.as_ref()) {
        SubmitOutcome::Saved { submission, .. } => {
            Html(render_editor(&form, &submission)).into_response()
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_editor(&form, &stored)),
        )
            .into_response(),
    }
}

async fn delete_post_handler(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete(&id) {
        Ok(()) => Redirect::to(SUBMISSIONS_PATH).into_response(),
        Err(err) => not_found_page(err),
    }
}
