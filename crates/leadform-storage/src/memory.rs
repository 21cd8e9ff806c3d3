//! In-memory document store.
//!
//! Documents live in a `BTreeMap` of collections behind a `RwLock`. Nothing
//! is persisted; all data is lost when the process exits. Useful for local
//! development and as a real store in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Document, DocumentId, DocumentStore, StoreError, validate_collection};

type Collections = BTreeMap<String, Vec<(DocumentId, Document)>>;

/// An in-memory document store.
///
/// Cloning shares the underlying data, so a test can keep one clone for
/// inspection while handing another to the code under test.
///
/// # Examples
///
/// ```
/// # use leadform_storage::{Document, DocumentStore, MemoryStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let id = store.create_document("projects", Document::new()).await.unwrap();
/// assert_eq!(store.documents("projects").await[0].0, id);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every document in `collection`, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<(DocumentId, Document)> {
        let data = self.data.read().await;
        data.get(collection).cloned().unwrap_or_default()
    }

    /// Total number of documents across all collections.
    pub async fn len(&self) -> usize {
        let data = self.data.read().await;
        data.values().map(Vec::len).sum()
    }

    /// Whether the store holds no documents at all.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError> {
        validate_collection(collection)?;
        let id = DocumentId::generate();
        let mut data = self.data.write().await;
        data.entry(collection.to_owned())
            .or_default()
            .push((id.clone(), fields));
        Ok(id)
    }
}
