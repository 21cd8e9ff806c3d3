//! HTTP error types for the `leadform` server.
//!
//! Maps submission errors from `leadform-core` into HTTP responses. Every
//! variant produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`. Messages are the form's fixed user sentences;
//! store internals never reach the response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use leadform_core::error::SubmitError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The request body was not a JSON object of form fields.
    InvalidBody { status: StatusCode, message: String },
    /// The submitted form was incomplete.
    Validation(String),
    /// A submission is already in flight.
    Conflict(String),
    /// No document store is available.
    StoreUnavailable(String),
    /// The document store rejected the write.
    WriteFailure(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    /// Status code and machine-readable tag for this error.
    #[must_use]
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidBody { status, .. } => (*status, "invalid_body"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "already_submitting"),
            Self::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
            Self::WriteFailure(_) => (StatusCode::BAD_GATEWAY, "write_failure"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        let message = match self {
            Self::InvalidBody { message: msg, .. }
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::StoreUnavailable(msg)
            | Self::WriteFailure(msg) => msg,
        };

        (status, axum::Json(ErrorBody { error, message })).into_response()
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        let msg = err.user_message().to_owned();
        match err {
            SubmitError::Validation { .. } => Self::Validation(msg),
            SubmitError::AlreadySubmitting => Self::Conflict(msg),
            SubmitError::StoreUnavailable => Self::StoreUnavailable(msg),
            SubmitError::WriteFailure(_) => Self::WriteFailure(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
