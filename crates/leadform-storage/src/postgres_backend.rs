//! PostgreSQL document store.
//!
//! All documents live in one `documents` table; fields are a JSONB column.
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime, so no `spawn_blocking` is needed.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{Document, DocumentId, DocumentStore, StoreError, validate_collection};

/// A document store backed by PostgreSQL.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PostgresStore {
    /// Connect to PostgreSQL and create the `documents` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the connection or table creation
    /// fails. The connection string is never included in the error.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connect {
                backend: "postgres",
                reason: e.to_string(),
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (\
                id         UUID        PRIMARY KEY, \
                collection TEXT        NOT NULL, \
                fields     JSONB       NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Connect {
            backend: "postgres",
            reason: format!("migration failed: {e}"),
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection \
             ON documents (collection, created_at)",
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Connect {
            backend: "postgres",
            reason: format!("index creation failed: {e}"),
        })?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<DocumentId, StoreError> {
        validate_collection(collection)?;
        let id = uuid::Uuid::new_v4();
        let fields = serde_json::to_value(&fields)?;

        sqlx::query("INSERT INTO documents (id, collection, fields) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(sqlx::types::Json(fields))
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write(collection, e))?;

        Ok(DocumentId::new(id.to_string()))
    }
}
