//! Pure-Rust redb document store.
//!
//! All documents share one table keyed `<collection>/<id>`, with the fields
//! stored as JSON. Feature-gated behind `redb-backend`. redb is synchronous,
//! so every transaction runs on the Tokio blocking thread pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};

use crate::{Document, DocumentId, DocumentStore, StoreError, validate_collection};

const DOCUMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// A document store backed by a redb database file.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn connect_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Connect {
        backend: "redb",
        reason: e.to_string(),
    }
}

impl RedbStore {
    /// Open or create a redb database at `path` and ensure the documents
    /// table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the file cannot be opened or the
    /// table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(connect_err)?;

        let txn = db.begin_write().map_err(connect_err)?;
        {
            let _table = txn.open_table(DOCUMENTS).map_err(connect_err)?;
        }
        txn.commit().map_err(connect_err)?;

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }

    /// Read back every document in `collection`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the read transaction fails and
    /// [`StoreError::Serialization`] if a stored document is not valid JSON.
    pub fn documents(&self, collection: &str) -> Result<Vec<(DocumentId, Document)>, StoreError> {
        let prefix = format!("{collection}/");
        let txn = self.db.begin_read().map_err(connect_err)?;
        let table = txn.open_table(DOCUMENTS).map_err(connect_err)?;

        let mut out = Vec::new();
        for item in table.range(prefix.as_str()..).map_err(connect_err)? {
            let (key, value) = item.map_err(connect_err)?;
            let Some(id) = key.value().strip_prefix(&prefix) else {
                break;
            };
            let fields: Document = serde_json::from_slice(value.value())?;
            out.push((DocumentId::new(id), fields));
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl DocumentStore for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError> {
        validate_collection(collection)?;
        let id = DocumentId::generate();
        let value = serde_json::to_vec(&fields)?;
        let key = format!("{collection}/{id}");

        let db = Arc::clone(&self.db);
        let coll = collection.to_owned();
        tokio::task::spawn_blocking(move || {
            let txn = db
                .begin_write()
                .map_err(|e| StoreError::write(&coll, e))?;
            {
                let mut table = txn
                    .open_table(DOCUMENTS)
                    .map_err(|e| StoreError::write(&coll, e))?;
                table
                    .insert(key.as_str(), value.as_slice())
                    .map_err(|e| StoreError::write(&coll, e))?;
            }
            txn.commit().map_err(|e| StoreError::write(&coll, e))
        })
        .await
        .map_err(|e| StoreError::write(collection, format!("blocking task panicked: {e}")))??;

        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::FieldValue;

    #[tokio::test]
    async fn create_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("docs.redb")).unwrap();

        let mut fields = Document::new();
        fields.insert("projectName".to_owned(), FieldValue::from("Bot"));
        let id = store.create_document("projects", fields.clone()).await.unwrap();
        store
            .create_document("other", Document::new())
            .await
            .unwrap();

        let docs = store.documents("projects").unwrap();
        assert_eq!(docs, vec![(id, fields)]);
    }

    #[tokio::test]
    async fn reopen_keeps_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store
                .create_document("projects", Document::new())
                .await
                .unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.documents("projects").unwrap().len(), 1);
    }
}
