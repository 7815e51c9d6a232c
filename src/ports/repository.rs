//! Repository Port - User Persistence Interface
//!
//! Defines the trait the HTTP/usecase layers depend on for user
//! storage. The concrete adapter binds this to a PostgreSQL pool;
//! tests bind it to mocks or an in-memory fake.

use async_trait::async_trait;

use crate::domain::user::User;

/// Trait for user persistence providers.
///
/// All methods surface failures to the caller instead of crashing the
/// process; a dropped database connection is a per-request error, not
/// a service-wide one.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
  /// Fetch all users ordered by ascending id.
  async fn list_users(&self) -> anyhow::Result<Vec<User>>;

  /// Insert a new user and return the stored row, including the
  /// server-assigned id.
  async fn create_user(&self, name: &str) -> anyhow::Result<User>;

  /// Execute a trivial query to check database reachability.
  ///
  /// Signals connectivity only, not schema correctness.
  async fn ping(&self) -> anyhow::Result<()>;

  /// Idempotently ensure the users table exists.
  ///
  /// Safe to run on every boot.
  async fn ensure_schema(&self) -> anyhow::Result<()>;
}
