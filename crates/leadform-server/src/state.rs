//! Shared application state for the `leadform` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. The store is optional: if it failed to open at
//! startup the server still runs, and every submission reports the store as
//! unavailable.

use std::sync::Arc;

use leadform_core::clock::Clock;
use leadform_core::form::SubmissionForm;
use leadform_storage::DocumentStore;

use crate::config::SiteConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The document store, if it opened at startup.
    pub store: Option<Arc<dyn DocumentStore>>,
    /// Time source for `submittedAt` and the footer year.
    pub clock: Arc<dyn Clock>,
    /// Landing page branding.
    pub site: SiteConfig,
}

impl AppState {
    /// A fresh, empty intake form bound to this server's store and clock.
    #[must_use]
    pub fn new_form(&self) -> SubmissionForm {
        SubmissionForm::new(self.store.clone(), Arc::clone(&self.clock))
    }

    /// Whether a document store is available.
    #[must_use]
    pub fn store_available(&self) -> bool {
        self.store.is_some()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.as_ref().map(|s| s.backend()))
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}
