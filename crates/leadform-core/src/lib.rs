//! Core library for `leadform`.
//!
//! Holds the [`ProjectSubmission`](submission::ProjectSubmission) record, the
//! intake [`SubmissionForm`](form::SubmissionForm) state machine, and the
//! [`Clock`](clock::Clock) capability used to stamp submissions. The crate
//! depends on `leadform-storage` only for the `DocumentStore` contract; it
//! knows nothing about HTTP or about any particular backend.

pub mod clock;
pub mod error;
pub mod form;
pub mod submission;
