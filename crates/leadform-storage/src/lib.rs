//! Document store abstraction for `leadform`.
//!
//! This crate defines the [`DocumentStore`] trait, an append-only document
//! sink organised into named collections. A store only knows how to create a
//! new document with a generated identifier; it never updates, reads back, or
//! deletes what the intake form wrote.
//!
//! Implementations:
//!
//! - [`MemoryStore`]: in-memory, for development and tests
//! - [`FileStore`]: append-only JSON-lines files, one per collection
//! - [`RedbStore`]: pure-Rust embedded database (feature `redb-backend`)
//! - [`PostgresStore`]: a `documents` table with JSONB fields (feature `postgres-backend`)
//! - [`FirestoreStore`]: Cloud Firestore over its REST API (feature `firestore`)
//!
//! [`connect`] is the single initialization entry point: it turns a
//! [`StoreConfig`] into a shared store handle or reports why it could not.

mod error;
mod file;
#[cfg(feature = "firestore")]
mod firestore;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;
#[cfg(feature = "redb-backend")]
mod redb_backend;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::StoreError;
pub use file::FileStore;
#[cfg(feature = "firestore")]
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresStore;
#[cfg(feature = "redb-backend")]
pub use redb_backend::RedbStore;

/// Identifier assigned to a document by the store that created it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a store-generated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (UUID v4) for local backends.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed field value inside a [`Document`].
///
/// Serialized with an explicit type tag (`{"string": ..}` / `{"timestamp": ..}`)
/// so timestamps survive a round trip through JSON without being confused
/// with ordinary text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    /// Free-form UTF-8 text.
    String(String),
    /// A point in time, always UTC.
    Timestamp(DateTime<Utc>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// The fields of one document, ordered by name.
pub type Document = BTreeMap<String, FieldValue>;

/// An append-only document store organised into named collections.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
/// Callers get at-most-once semantics: a failed write is reported once and
/// never retried by the store.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Short backend name used in logs (e.g. `memory`, `firestore`).
    fn backend(&self) -> &'static str;

    /// Create a new document in `collection` and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCollection`] for a malformed collection
    /// name and [`StoreError::Write`] for any failure of the underlying
    /// backend (I/O, network, permission, quota).
    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError>;
}

/// Which backend [`connect`] should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// JSON-lines files under a directory.
    File { path: PathBuf },
    /// Redb database file.
    Redb { path: PathBuf },
    /// PostgreSQL connection string.
    Postgres { url: String },
    /// Cloud Firestore project reached over REST.
    Firestore {
        project_id: String,
        api_key: String,
        database: String,
    },
}

/// Open the configured backend and return a shared handle.
///
/// This runs once at process start. A caller that cannot connect keeps
/// running without a store rather than retrying.
///
/// # Errors
///
/// Returns [`StoreError::Connect`] if the backend cannot be opened, or if it
/// was requested but the matching cargo feature is not enabled.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::File { path } => Ok(Arc::new(FileStore::open(path).await?)),
        #[cfg(feature = "redb-backend")]
        StoreConfig::Redb { path } => Ok(Arc::new(RedbStore::open(path)?)),
        #[cfg(not(feature = "redb-backend"))]
        StoreConfig::Redb { .. } => Err(StoreError::feature_disabled("redb", "redb-backend")),
        #[cfg(feature = "postgres-backend")]
        StoreConfig::Postgres { url } => Ok(Arc::new(PostgresStore::connect(url).await?)),
        #[cfg(not(feature = "postgres-backend"))]
        StoreConfig::Postgres { .. } => Err(StoreError::feature_disabled(
            "postgres",
            "postgres-backend",
        )),
        #[cfg(feature = "firestore")]
        StoreConfig::Firestore {
            project_id,
            api_key,
            database,
        } => Ok(Arc::new(FirestoreStore::new(project_id, api_key, database)?)),
        #[cfg(not(feature = "firestore"))]
        StoreConfig::Firestore { .. } => {
            Err(StoreError::feature_disabled("firestore", "firestore"))
        }
    }
}

/// Check a collection name before it is used as a path segment or key prefix.
///
/// Only ASCII alphanumerics, `_` and `-` are accepted.
///
/// # Errors
///
/// Returns [`StoreError::InvalidCollection`] if the name is empty or contains
/// any other character.
pub fn validate_collection(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection {
            name: name.to_owned(),
        })
    }
}
