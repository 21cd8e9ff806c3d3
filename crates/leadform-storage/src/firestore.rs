//! Cloud Firestore document store over the REST API.
//!
//! Creates documents with
//! `POST {base}/projects/{project}/databases/{database}/documents/{collection}?key={api_key}`.
//! Firestore assigns the document id; it is the last path segment of the
//! `name` field in the response. Feature-gated behind `firestore`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Document, DocumentId, DocumentStore, FieldValue, StoreError, validate_collection};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct CreateRequest {
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct CreateResponse {
    name: String,
}

/// A document store that writes to a Cloud Firestore database.
#[derive(Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    api_key: String,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl FirestoreStore {
    /// Build a store for `project_id` / `database`, authenticating with a
    /// web API key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the project id or API key is empty
    /// or the HTTP client cannot be built.
    pub fn new(project_id: &str, api_key: &str, database: &str) -> Result<Self, StoreError> {
        if project_id.is_empty() {
            return Err(StoreError::Connect {
                backend: "firestore",
                reason: "project id is empty".to_owned(),
            });
        }
        if api_key.is_empty() {
            return Err(StoreError::Connect {
                backend: "firestore",
                reason: "API key is empty".to_owned(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Connect {
                backend: "firestore",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
            project_id: project_id.to_owned(),
            database: database.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// Point the store at a different REST endpoint (emulator or proxy).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{collection}",
            self.base_url, self.project_id, self.database
        )
    }
}

/// Encode document fields as Firestore typed values.
fn encode_fields(fields: &Document) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| {
            let typed = match value {
                FieldValue::String(s) => serde_json::json!({ "stringValue": s }),
                FieldValue::Timestamp(at) => serde_json::json!({
                    "timestampValue": at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
                }),
            };
            (name.clone(), typed)
        })
        .collect()
}

/// Extract the generated id from a resource name such as
/// `projects/p/databases/(default)/documents/projects/AbC123`.
fn id_from_name(name: &str) -> Option<DocumentId> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(DocumentId::new)
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreStore {
    fn backend(&self) -> &'static str {
        "firestore"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError> {
        validate_collection(collection)?;
        let body = CreateRequest {
            fields: encode_fields(&fields),
        };

        let resp = self
            .client
            .post(self.collection_url(collection))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::write(collection, format!("HTTP error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(StoreError::write(
                collection,
                format!("Firestore returned {status}: {text}"),
            ));
        }

        let created: CreateResponse = resp.json().await.map_err(|e| {
            StoreError::write(collection, format!("failed to parse response: {e}"))
        })?;

        id_from_name(&created.name).ok_or_else(|| {
            StoreError::write(
                collection,
                format!("response name '{}' has no document id", created.name),
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn encodes_typed_values() {
        let at: DateTime<Utc> = "2025-03-04T05:06:07Z".parse().unwrap();
        let mut fields = Document::new();
        fields.insert("clientName".to_owned(), FieldValue::from("Jane"));
        fields.insert("submittedAt".to_owned(), FieldValue::from(at));

        let encoded = Value::Object(encode_fields(&fields));
        assert_eq!(
            encoded,
            serde_json::json!({
                "clientName": { "stringValue": "Jane" },
                "submittedAt": { "timestampValue": "2025-03-04T05:06:07.000000Z" },
            })
        );
    }

    #[test]
    fn id_is_last_name_segment() {
        let id = id_from_name("projects/p/databases/(default)/documents/projects/AbC123");
        assert_eq!(id, Some(DocumentId::new("AbC123")));
        assert_eq!(id_from_name("projects/p/documents/projects/"), None);
    }

    #[test]
    fn builds_collection_url() {
        let store = FirestoreStore::new("demo-app", "key", "(default)")
            .unwrap()
            .with_base_url("http://localhost:8081/v1/");
        assert_eq!(
            store.collection_url("projects"),
            "http://localhost:8081/v1/projects/demo-app/databases/(default)/documents/projects"
        );
    }

    #[test]
    fn rejects_empty_credentials() {
        assert!(FirestoreStore::new("", "key", "(default)").is_err());
        assert!(FirestoreStore::new("p", "", "(default)").is_err());
    }

    // ── REST round trips against a local stand-in for Firestore ──────

    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::sync::Mutex;

    /// One request as the stand-in server saw it.
    #[derive(Debug, Clone)]
    struct Seen {
        project: String,
        database: String,
        collection: String,
        key: Option<String>,
        body: Value,
    }

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        reply: &'static str,
        seen: Arc<Mutex<Vec<Seen>>>,
    }

    async fn create(
        State(stub): State<Stub>,
        Path((project, database, collection)): Path<(String, String, String)>,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> impl axum::response::IntoResponse {
        stub.seen.lock().await.push(Seen {
            project,
            database,
            collection,
            key: query.get("key").cloned(),
            body,
        });
        (stub.status, [(CONTENT_TYPE, "application/json")], stub.reply)
    }

    /// Serve a canned reply on an ephemeral port; returns the store pointed
    /// at it and the log of received requests.
    async fn stub_store(
        status: StatusCode,
        reply: &'static str,
    ) -> (FirestoreStore, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/v1/projects/{project}/databases/{database}/documents/{collection}",
                post(create),
            )
            .with_state(Stub {
                status,
                reply,
                seen: Arc::clone(&seen),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let store = FirestoreStore::new("demo-app", "test-key", "(default)")
            .unwrap()
            .with_base_url(format!("http://{addr}/v1"));
        (store, seen)
    }

    fn submission() -> Document {
        let at: DateTime<Utc> = "2025-03-04T05:06:07Z".parse().unwrap();
        let mut fields = Document::new();
        fields.insert("clientName".to_owned(), FieldValue::from("Jane"));
        fields.insert("status".to_owned(), FieldValue::from("New"));
        fields.insert("submittedAt".to_owned(), FieldValue::from(at));
        fields
    }

    #[tokio::test]
    async fn create_returns_server_assigned_id() {
        let (store, seen) = stub_store(
            StatusCode::OK,
            r#"{"name":"projects/demo-app/databases/(default)/documents/projects/AbC123","fields":{}}"#,
        )
        .await;

        let id = store.create_document("projects", submission()).await.unwrap();
        assert_eq!(id, DocumentId::new("AbC123"));

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.project, "demo-app");
        assert_eq!(req.database, "(default)");
        assert_eq!(req.collection, "projects");
        assert_eq!(req.key.as_deref(), Some("test-key"));
        assert_eq!(
            req.body,
            serde_json::json!({
                "fields": {
                    "clientName": { "stringValue": "Jane" },
                    "status": { "stringValue": "New" },
                    "submittedAt": { "timestampValue": "2025-03-04T05:06:07.000000Z" },
                }
            })
        );
    }

    #[tokio::test]
    async fn error_status_becomes_write_error() {
        let (store, seen) = stub_store(
            StatusCode::FORBIDDEN,
            r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#,
        )
        .await;

        let err = store.create_document("projects", submission()).await.unwrap_err();
        assert!(
            matches!(
                &err,
                StoreError::Write { collection, reason }
                    if collection == "projects"
                        && reason.contains("403")
                        && reason.contains("PERMISSION_DENIED")
            ),
            "{err:?}"
        );
        assert_eq!(seen.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn malformed_reply_becomes_write_error() {
        let (store, _seen) = stub_store(StatusCode::OK, "<html>not json</html>").await;
        let err = store.create_document("projects", submission()).await.unwrap_err();
        assert!(matches!(err, StoreError::Write { ref reason, .. } if reason.contains("parse")));
    }

    #[tokio::test]
    async fn reply_without_id_becomes_write_error() {
        let (store, _seen) =
            stub_store(StatusCode::OK, r#"{"name":"projects/demo-app/documents/projects/"}"#).await;
        let err = store.create_document("projects", submission()).await.unwrap_err();
        assert!(matches!(err, StoreError::Write { ref reason, .. } if reason.contains("no document id")));
    }

    #[tokio::test]
    async fn bad_collection_is_refused_before_any_request() {
        let (store, seen) = stub_store(StatusCode::OK, "{}").await;
        let err = store.create_document("../admin", submission()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCollection { .. }));
        assert!(seen.lock().await.is_empty());
    }
}
