//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain validation with port interfaces to implement
//! the service's operations.
//!
//! Use cases:
//! - `UserService`: user listing and creation over the repository port

pub mod users;

pub use users::{CreateUserError, UserService};
