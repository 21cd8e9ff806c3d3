//! JSON-lines document store.
//!
//! Each collection is a file `<dir>/<collection>.jsonl` opened in append-only
//! mode. Every line is one complete JSON object:
//!
//! ```text
//! {"id":"…","collection":"projects","fields":{"clientName":{"string":"Jane"}, …}}
//! ```
//!
//! # Thread safety
//!
//! A `tokio::sync::Mutex` around the open file handles serializes writes, so
//! lines from concurrent submissions never interleave.
//!
//! A handle whose write fails is dropped. When a file is (re)opened and its
//! last line is unterminated, a newline is written first so the next record
//! starts on a line of its own.

use std::collections::HashMap;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::{Document, DocumentId, DocumentStore, StoreError, validate_collection};

#[derive(Serialize)]
struct Line<'a> {
    id: &'a DocumentId,
    collection: &'a str,
    fields: &'a Document,
}

/// A document store that appends JSON lines to one file per collection.
pub struct FileStore {
    dir: PathBuf,
    writers: Mutex<HashMap<String, File>>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// Collection files are created lazily on first write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the directory cannot be created.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::Connect {
                backend: "file",
                reason: format!("failed to create '{}': {e}", dir.display()),
            })?;

        Ok(Self {
            dir: dir.to_path_buf(),
            writers: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the file backing `collection`.
    #[must_use]
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.jsonl"))
    }
}

#[async_trait::async_trait]
impl DocumentStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError> {
        validate_collection(collection)?;
        let id = DocumentId::generate();

        let mut line = serde_json::to_vec(&Line {
            id: &id,
            collection,
            fields: &fields,
        })?;
        line.push(b'\n');

        let mut writers = self.writers.lock().await;
        if !writers.contains_key(collection) {
            let path = self.collection_path(collection);
            let file = open_for_append(&path).await.map_err(|e| {
                StoreError::write(collection, format!("open '{}': {e}", path.display()))
            })?;
            writers.insert(collection.to_owned(), file);
        }

        let file = writers
            .get_mut(collection)
            .ok_or_else(|| StoreError::write(collection, "file handle missing after open"))?;

        let written = async {
            file.write_all(&line).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            writers.remove(collection);
            return Err(StoreError::write(collection, format!("write failed: {e}")));
        }

        Ok(id)
    }
}

/// Open `path` for appending, terminating a dangling partial line if the
/// previous writer died mid-record.
async fn open_for_append(path: &Path) -> std::io::Result<File> {
    let dangling = ends_mid_line(path).await?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    if dangling {
        file.write_all(b"\n").await?;
    }
    Ok(file)
}

async fn ends_mid_line(path: &Path) -> std::io::Result<bool> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if file.metadata().await?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] != b'\n')
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
