//! Async Rust client for the Exameets portal HTTP API.
//!
//! The portal exposes a conventional REST-ish surface under `/api/v1`:
//! seven content resources (jobs, government jobs, exams, scholarships,
//! admit cards, admissions, previous-year papers) plus a cookie-session
//! user/auth surface. This crate is the transport adapter only -- it
//! performs requests with credentials included, parses the JSON payloads
//! into opaque [`Record`]s, and turns every failure into an [`Error`]
//! carrying the backend's own message string. State bookkeeping lives
//! upstream in `exameets-core`.
//!
//! The adapter never retries, never caches, and never deduplicates
//! concurrent requests.

pub mod client;
pub mod error;
pub mod model;
pub mod resource;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use model::{ListQuery, Pagination, Record, ResourcePage, split_list_fields};
pub use resource::{MutationOutcome, ResourceRoute, routes};
pub use session::{LoginCredentials, RegisterPayload};
pub use transport::TransportConfig;
