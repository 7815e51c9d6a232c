//! Persistence Adapters - PostgreSQL-backed Storage
//!
//! Implements the `UserRepository` port over a bounded sqlx connection
//! pool. All queries use parameter binding; request data never reaches
//! the SQL text.

pub mod postgres;

pub use postgres::PgUserRepository;
