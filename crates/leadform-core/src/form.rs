//! The project intake form.
//!
//! [`SubmissionForm`] owns the transient [`FormState`] of one form instance
//! and drives it through a submission attempt:
//!
//! ```text
//! Idle ──submit──▶ validate ──incomplete──▶ Rejected (message shown)
//!                     │
//!                     ├──no store──▶ Rejected (message shown)
//!                     ▼
//!                 Submitting ──ok──▶ Succeeded (fields cleared)
//!                     └──────err──▶ Failed    (fields kept)
//! ```
//!
//! `Rejected`, `Succeeded` and `Failed` end one attempt only; the form is
//! immediately ready for the next edit or submit.
//!
//! Hosts that need to keep handling edits while the write is outstanding use
//! the split API: [`SubmissionForm::begin_submit`] validates and hands back a
//! [`PendingWrite`], the host awaits [`PendingWrite::execute`], then feeds
//! the result to [`SubmissionForm::complete`]. [`SubmissionForm::submit`]
//! does all three in one call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use leadform_storage::{DocumentId, DocumentStore, StoreError};

use crate::clock::Clock;
use crate::error::SubmitError;
use crate::submission::{FormField, FormFields, PROJECTS_COLLECTION, ProjectSubmission};

/// Result tag of the most recent write attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Success,
    Failure,
}

/// Where the form is in its lifecycle, derived from [`FormState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

/// The single message slot under the form. At most one is ever shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMessage {
    /// Local problem: incomplete form or no store.
    Error(&'static str),
    /// The submission was stored.
    Success,
    /// The store rejected the write; carries the retry sentence.
    Failure(&'static str),
}

/// Transient, in-memory state of one form instance. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: FormFields,
    submitting: bool,
    outcome: Outcome,
    error: Option<&'static str>,
}

impl FormState {
    /// Current text of the four inputs.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Whether a write is outstanding. Hosts disable the submit control
    /// while this is true.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The user-visible error sentence, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.submitting {
            Phase::Submitting
        } else {
            match (self.outcome, self.error) {
                (Outcome::Success, _) => Phase::Succeeded,
                (Outcome::Failure, _) => Phase::Failed,
                (Outcome::None, Some(_)) => Phase::Rejected,
                (Outcome::None, None) => Phase::Idle,
            }
        }
    }

    /// What the message slot shows right now.
    #[must_use]
    pub fn message(&self) -> Option<FormMessage> {
        match (self.outcome, self.error) {
            (Outcome::Failure, Some(msg)) => Some(FormMessage::Failure(msg)),
            (_, Some(msg)) => Some(FormMessage::Error(msg)),
            (Outcome::Success, None) => Some(FormMessage::Success),
            (Outcome::Failure | Outcome::None, None) => None,
        }
    }
}

/// A validated submission waiting to be written.
///
/// Produced by [`SubmissionForm::begin_submit`]. Executing it performs the
/// single store call of this attempt; nothing retries it.
pub struct PendingWrite {
    store: Arc<dyn DocumentStore>,
    submission: ProjectSubmission,
}

impl PendingWrite {
    /// The record that will be written.
    #[must_use]
    pub fn submission(&self) -> &ProjectSubmission {
        &self.submission
    }

    /// Write the submission into the `projects` collection.
    ///
    /// # Errors
    ///
    /// Returns whatever the store reported; pass it to
    /// [`SubmissionForm::complete`] either way.
    pub async fn execute(self) -> Result<DocumentId, StoreError> {
        self.store
            .create_document(PROJECTS_COLLECTION, self.submission.to_document())
            .await
    }
}

impl std::fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingWrite")
            .field("backend", &self.store.backend())
            .field("submission", &self.submission)
            .finish()
    }
}

/// One intake form bound to an optional store and a clock.
///
/// A `None` store means initialization failed at startup; every submit then
/// ends with the "not available" message and no write is attempted.
pub struct SubmissionForm {
    store: Option<Arc<dyn DocumentStore>>,
    clock: Arc<dyn Clock>,
    state: FormState,
}

impl std::fmt::Debug for SubmissionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionForm")
            .field("store", &self.store.as_ref().map(|s| s.backend()))
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SubmissionForm {
    /// Create an empty form.
    #[must_use]
    pub fn new(store: Option<Arc<dyn DocumentStore>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: FormState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Overwrite one input. No validation; allowed at any time, including
    /// while a write is outstanding.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.fields.set(field, value.into());
    }

    /// Validate and, if possible, prepare the write.
    ///
    /// On success the form is in [`Phase::Submitting`] and the caller must
    /// eventually pass the write's result to [`complete`](Self::complete),
    /// or call [`cancel_submit`](Self::cancel_submit) if it drops the
    /// [`PendingWrite`] unfinished.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::AlreadySubmitting`] if a previous write has not
    ///   completed; the state is left untouched.
    /// - [`SubmitError::Validation`] if any field is blank after trimming.
    /// - [`SubmitError::StoreUnavailable`] if the form has no store.
    pub fn begin_submit(&mut self) -> Result<PendingWrite, SubmitError> {
        if self.state.submitting {
            debug!("submit ignored, previous write still in flight");
            return Err(SubmitError::AlreadySubmitting);
        }

        self.state.error = None;
        self.state.outcome = Outcome::None;

        let submitted_at = self.clock.now();
        let submission = match ProjectSubmission::from_fields(&self.state.fields, submitted_at) {
            Ok(submission) => submission,
            Err(missing) => {
                debug!(?missing, "submission rejected, form incomplete");
                return Err(self.reject(SubmitError::Validation { missing }));
            }
        };

        let Some(store) = self.store.clone() else {
            debug!("submission rejected, no document store");
            return Err(self.reject(SubmitError::StoreUnavailable));
        };

        self.state.submitting = true;
        Ok(PendingWrite { store, submission })
    }

    /// Apply the result of a [`PendingWrite`].
    ///
    /// Success clears the four fields; failure keeps them so the user can
    /// retry without retyping. `submitting` is cleared either way.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::WriteFailure`] if the store rejected the write.
    pub fn complete(
        &mut self,
        result: Result<DocumentId, StoreError>,
    ) -> Result<DocumentId, SubmitError> {
        self.state.submitting = false;
        match result {
            Ok(id) => {
                info!(document_id = %id, collection = PROJECTS_COLLECTION, "project submission stored");
                self.state.outcome = Outcome::Success;
                self.state.error = None;
                self.state.fields = FormFields::default();
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "failed to store project submission");
                self.state.outcome = Outcome::Failure;
                let err = SubmitError::WriteFailure(e);
                self.state.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Release the form after a [`PendingWrite`] was dropped without a
    /// result. Fields and messages are left as they are; no outcome is
    /// recorded since the write's fate is unknown.
    pub fn cancel_submit(&mut self) {
        if self.state.submitting {
            debug!("in-flight submission abandoned");
            self.state.submitting = false;
        }
    }

    /// Run a whole attempt: validate, write once, apply the result.
    ///
    /// Dropping the returned future mid-write (a timeout, an aborted task)
    /// releases the form as [`cancel_submit`](Self::cancel_submit) does.
    ///
    /// # Errors
    ///
    /// See [`begin_submit`](Self::begin_submit) and
    /// [`complete`](Self::complete).
    pub async fn submit(&mut self) -> Result<DocumentId, SubmitError> {
        let pending = self.begin_submit()?;
        let result = {
            let guard = InFlight {
                form: &mut *self,
                armed: true,
            };
            let result = pending.execute().await;
            guard.disarm();
            result
        };
        self.complete(result)
    }

    fn reject(&mut self, err: SubmitError) -> SubmitError {
        self.state.error = Some(err.user_message());
        err
    }
}

/// Clears `submitting` if a [`SubmissionForm::submit`] future is dropped
/// while its write is outstanding.
struct InFlight<'a> {
    form: &'a mut SubmissionForm,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.form.cancel_submit();
        }
    }
}
