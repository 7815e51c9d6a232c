//! User Service - Validation and Repository Orchestration
//!
//! Sits between the HTTP adapter and the repository port: validates
//! creation requests, delegates storage, and keeps validation failures
//! typed apart from database failures so the route layer can map them
//! to 400 vs 500 without inspecting error strings.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::user::{NewUser, User, ValidationError};
use crate::ports::repository::UserRepository;

/// Why a create request failed.
#[derive(Debug, Error)]
pub enum CreateUserError {
  /// Request rejected before reaching the database.
  #[error(transparent)]
  Validation(#[from] ValidationError),
  /// The insert itself failed.
  #[error("database error")]
  Database(#[source] anyhow::Error),
}

/// User listing and creation over the repository port.
pub struct UserService {
  repository: Arc<dyn UserRepository>,
}

impl UserService {
  /// Create a new service over the given repository.
  pub fn new(repository: Arc<dyn UserRepository>) -> Self {
    Self { repository }
  }

  /// List all users in ascending id order.
  pub async fn list(&self) -> anyhow::Result<Vec<User>> {
    self.repository.list_users().await
  }

  /// Validate and persist a new user.
  ///
  /// The repository is not consulted for invalid requests, so a
  /// rejected create never touches the pool.
  pub async fn create(&self, request: &NewUser) -> Result<User, CreateUserError> {
    let name = request.validate()?;

    let user = self
      .repository
      .create_user(name)
      .await
      .map_err(CreateUserError::Database)?;

    info!(id = user.id, "User created");
    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::sync::Mutex;

  /// In-memory repository fake assigning serial ids.
  struct InMemoryRepo {
    rows: Mutex<Vec<User>>,
  }

  impl InMemoryRepo {
    fn new() -> Self {
      Self {
        rows: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl UserRepository for InMemoryRepo {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
      Ok(self.rows.lock().unwrap().clone())
    }

    async fn create_user(&self, name: &str) -> anyhow::Result<User> {
      let mut rows = self.rows.lock().unwrap();
      let user = User {
        id: rows.len() as i32 + 1,
        name: name.to_string(),
      };
      rows.push(user.clone());
      Ok(user)
    }

    async fn ping(&self) -> anyhow::Result<()> {
      Ok(())
    }

    async fn ensure_schema(&self) -> anyhow::Result<()> {
      Ok(())
    }
  }

  #[tokio::test]
  async fn create_then_list_returns_stored_user() {
    let service = UserService::new(Arc::new(InMemoryRepo::new()));

    let created = service
      .create(&NewUser {
        name: "Alice".to_string(),
      })
      .await
      .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Alice");

    let users = service.list().await.unwrap();
    assert_eq!(users, vec![created]);
  }

  #[tokio::test]
  async fn create_stores_name_verbatim() {
    let service = UserService::new(Arc::new(InMemoryRepo::new()));

    let created = service
      .create(&NewUser {
        name: " Bob  Jr. ".to_string(),
      })
      .await
      .unwrap();
    assert_eq!(created.name, " Bob  Jr. ");
  }

  #[tokio::test]
  async fn invalid_name_never_reaches_repository() {
    let repo = Arc::new(InMemoryRepo::new());
    let service = UserService::new(Arc::clone(&repo) as Arc<dyn UserRepository>);

    let err = service
      .create(&NewUser {
        name: "  ".to_string(),
      })
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      CreateUserError::Validation(ValidationError::MissingName)
    ));
    assert!(repo.rows.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn ids_are_fresh_and_ascending() {
    let service = UserService::new(Arc::new(InMemoryRepo::new()));

    for name in ["a", "b", "c"] {
      service
        .create(&NewUser {
          name: name.to_string(),
        })
        .await
        .unwrap();
    }

    let users = service.list().await.unwrap();
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
  }
}
