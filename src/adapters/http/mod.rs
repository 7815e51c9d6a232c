//! HTTP Adapters - axum API Surface
//!
//! Exposes the user directory over HTTP/1.1 JSON: liveness, readiness,
//! user listing/creation, and the Prometheus exposition. Handlers hold
//! no state of their own; everything they need is injected through
//! `AppState` at startup.

pub mod routes;
pub mod server;

pub use routes::{router, ApiError, AppState};
pub use server::ApiServer;
