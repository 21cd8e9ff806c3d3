//! Shared helpers for router integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use leadform_core::clock::FixedClock;
use leadform_server::config::SiteConfig;
use leadform_server::routes;
use leadform_server::state::AppState;
use leadform_storage::{Document, DocumentId, DocumentStore, StoreError};

/// A store that rejects every write.
pub struct FailingStore;

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn create_document(
        &self,
        collection: &str,
        _fields: Document,
    ) -> Result<DocumentId, StoreError> {
        Err(StoreError::Write {
            collection: collection.to_owned(),
            reason: "PERMISSION_DENIED: missing or insufficient permissions".to_owned(),
        })
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    "2025-09-10T11:12:13Z".parse().unwrap()
}

/// Build the full router over the given store, with a frozen clock.
pub fn build_test_app(store: Option<Arc<dyn DocumentStore>>) -> Router {
    let state = Arc::new(AppState {
        store,
        clock: Arc::new(FixedClock::new(fixed_time())),
        site: SiteConfig {
            name: "AutomateIQ".to_owned(),
            contact_email: Some("hello@automateiq.test".to_owned()),
        },
    });
    routes::build_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
