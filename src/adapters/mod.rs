//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (PostgreSQL, HTTP, Prometheus). Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `http`: axum API server (health, readiness, users, metrics routes)
//! - `metrics`: Prometheus registry and the remote-write push task
//! - `persistence`: PostgreSQL-backed user repository

pub mod http;
pub mod metrics;
pub mod persistence;
