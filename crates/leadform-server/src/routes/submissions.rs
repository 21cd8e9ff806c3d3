//! JSON intake API: `POST /v1/submissions`.
//!
//! Same state machine as the HTML form, for clients that render their own
//! page. Each request is one independent form instance.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use leadform_core::submission::{FormField, FormFields, SubmissionStatus};
use leadform_storage::DocumentId;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/submissions` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(create_submission))
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: DocumentId,
    pub status: SubmissionStatus,
}

async fn create_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FormFields>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let Json(body) = payload?;
    let mut form = state.new_form();
    for field in FormField::ALL {
        form.update_field(field, body.get(field));
    }

    let id = form.submit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            id,
            status: SubmissionStatus::New,
        }),
    ))
}
