//! Store error types.
//!
//! Every variant carries enough context to diagnose the problem from a log
//! line. None of these strings are meant for end users; the intake form maps
//! them to its own fixed messages.

/// Errors that can occur while opening or writing to a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be opened or reached during initialization.
    #[error("failed to connect {backend} store: {reason}")]
    Connect {
        backend: &'static str,
        reason: String,
    },

    /// Creating a document failed (I/O, network, permission, quota).
    #[error("failed to write document to collection '{collection}': {reason}")]
    Write { collection: String, reason: String },

    /// A document could not be encoded for the backend.
    #[error("failed to serialize document: {reason}")]
    Serialization { reason: String },

    /// The collection name is empty or contains disallowed characters.
    #[error("invalid collection name '{name}'")]
    InvalidCollection { name: String },
}

impl StoreError {
    pub(crate) fn write(collection: &str, reason: impl ToString) -> Self {
        Self::Write {
            collection: collection.to_owned(),
            reason: reason.to_string(),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn feature_disabled(backend: &'static str, feature: &str) -> Self {
        Self::Connect {
            backend,
            reason: format!("backend requested but feature '{feature}' is not enabled"),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
