//! Core user directory domain types.
//!
//! Defines the `User` entity, the `NewUser` creation request, and the
//! name validation rules enforced before anything touches the database.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted name length, matching the `VARCHAR(100)` column.
pub const MAX_NAME_LEN: usize = 100;

/// A persisted user row.
///
/// `id` is assigned by the database (serial primary key) and is unique
/// and monotonically increasing. Users are never updated or deleted by
/// this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Server-assigned unique identifier.
    pub id: i32,
    /// Display name, non-empty, at most [`MAX_NAME_LEN`] characters.
    pub name: String,
}

/// Request body for user creation.
///
/// `name` defaults to empty when the field is absent, so a missing
/// field takes the same validation path as an empty one (400, not a
/// deserialization rejection).
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
}

/// Why a creation request was rejected before reaching the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name absent, empty, or whitespace-only.
    #[error("name is required")]
    MissingName,
    /// Name longer than [`MAX_NAME_LEN`] characters.
    #[error("name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,
}

impl NewUser {
    /// Validate the request, returning the name to store.
    ///
    /// Emptiness is judged on the trimmed name, but the accepted name is
    /// stored verbatim.
    pub fn validate(&self) -> Result<&str, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong);
        }
        Ok(&self.name)
    }
}
