//! HTTP routes and the application router.

pub mod health;
pub mod landing;
pub mod submissions;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header::{X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest accepted request body. Four text fields never need more.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Concurrent submissions allowed in flight against the store.
const MAX_CONCURRENT_SUBMISSIONS: usize = 32;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let submission_routes = Router::new()
        .merge(landing::router())
        .nest("/v1/submissions", submissions::router())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_SUBMISSIONS));

    Router::new()
        .merge(submission_routes)
        .merge(health::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
