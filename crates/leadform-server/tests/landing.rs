//! HTTP-level tests for the landing page and the HTML form post.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{FailingStore, body_text, build_test_app, get, post_form};
use leadform_storage::MemoryStore;

const COMPLETE: &str = "clientName=Jane+Doe&contactEmail=jane%40example.com\
    &projectName=Bot&projectDescription=Automate+X";

#[tokio::test]
async fn landing_page_renders_empty_form() {
    let app = build_test_app(Some(Arc::new(MemoryStore::new())));
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let html = body_text(response).await;
    assert!(html.contains("Your Vision, Automated. For Free."));
    assert!(html.contains(r#"id="submit-form""#));
    assert!(html.contains(r#"name="clientName" value="""#));
    assert!(html.contains("&copy; 2025 AutomateIQ"));
    assert!(html.contains("mailto:hello@automateiq.test"));
    assert!(!html.contains(r#"class="form-error""#));
    assert!(!html.contains(" disabled>"));
}

#[tokio::test]
async fn successful_post_clears_fields_and_shows_banner() {
    let store = MemoryStore::new();
    let app = build_test_app(Some(Arc::new(store.clone())));

    let response = post_form(app, "/submit", COMPLETE).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<strong>Success!</strong>"));
    assert!(!html.contains(r#"value="Jane Doe""#));
    assert!(!html.contains(r#"class="form-error""#));
    assert_eq!(store.documents("projects").await.len(), 1);
}

#[tokio::test]
async fn incomplete_post_keeps_values_and_shows_error() {
    let store = MemoryStore::new();
    let app = build_test_app(Some(Arc::new(store.clone())));

    let response = post_form(
        app,
        "/submit",
        "clientName=Jane+Doe&contactEmail=&projectName=Bot&projectDescription=",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains(r#"<p class="form-error">Please fill out all fields.</p>"#));
    assert!(html.contains(r#"value="Jane Doe""#));
    assert!(!html.contains("<strong>Success!</strong>"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn failed_write_keeps_values_and_shows_one_banner() {
    let app = build_test_app(Some(Arc::new(FailingStore)));

    let response = post_form(app, "/submit", COMPLETE).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("<strong>Oops!</strong> There was an issue submitting your request."));
    assert!(!html.contains(r#"class="form-error""#));
    assert!(html.contains(r#"value="Jane Doe""#));
    assert!(html.contains(">Automate X</textarea>"));
}

#[tokio::test]
async fn no_store_post_shows_unavailable_message() {
    let app = build_test_app(None);
    let response = post_form(app, "/submit", COMPLETE).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(response).await;
    assert!(html.contains("Database connection not available. Please try again later."));
}

#[tokio::test]
async fn posted_values_are_escaped() {
    let app = build_test_app(None);
    let response = post_form(
        app,
        "/submit",
        "clientName=%3Cscript%3Ex%3C%2Fscript%3E&contactEmail=&projectName=&projectDescription=",
    )
    .await;

    let html = body_text(response).await;
    assert!(!html.contains("<script>x</script>"));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
}
