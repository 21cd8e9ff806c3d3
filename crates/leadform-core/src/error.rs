//! Error types for `leadform-core`.
//!
//! Every submission attempt ends in at most one [`SubmitError`]. Each variant
//! maps to a fixed user-facing sentence; the underlying store failure is kept
//! for operators and never shown to the person filling in the form.

use leadform_storage::StoreError;

use crate::submission::FormField;

/// Shown when any of the four fields is empty or whitespace-only.
pub const MSG_INCOMPLETE: &str = "Please fill out all fields.";

/// Shown when the process has no document store.
pub const MSG_STORE_UNAVAILABLE: &str =
    "Database connection not available. Please try again later.";

/// Shown when the store rejected the write.
pub const MSG_WRITE_FAILURE: &str =
    "There was an issue submitting your request. Please try again.";

/// Shown when a submit arrives while the previous one is still in flight.
pub const MSG_ALREADY_SUBMITTING: &str =
    "Your previous submission is still being sent. Please wait.";

/// Why a submission attempt did not produce a stored document.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// At least one field was empty after trimming.
    #[error("form incomplete: {missing:?} empty")]
    Validation { missing: Vec<FormField> },

    /// No document store is available to this form.
    #[error("document store unavailable")]
    StoreUnavailable,

    /// The store failed to create the document.
    #[error("write failed: {0}")]
    WriteFailure(#[from] StoreError),

    /// A previous submission from this form has not finished yet.
    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

impl SubmitError {
    /// The fixed sentence to show in the form's message area.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => MSG_INCOMPLETE,
            Self::StoreUnavailable => MSG_STORE_UNAVAILABLE,
            Self::WriteFailure(_) => MSG_WRITE_FAILURE,
            Self::AlreadySubmitting => MSG_ALREADY_SUBMITTING,
        }
    }
}
