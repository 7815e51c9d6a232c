//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `UserRepository`: User persistence (PostgreSQL-backed)

pub mod repository;

pub use repository::UserRepository;
