//! `leadform` HTTP server.
//!
//! Wires the intake form from `leadform-core` and a document store from
//! `leadform-storage` into an Axum server. Serves the landing page at `/`,
//! the HTML form post at `/submit`, and the JSON API at `/v1/submissions`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
