//! The user store abstraction shared by every backend.

use async_trait::async_trait;

use gatehouse_core::result::AppResult;
use gatehouse_entity::user::{CreateUser, User};

/// Persists and retrieves users keyed by unique username.
///
/// Implementations must enforce username uniqueness atomically inside
/// `create`: of any number of concurrent calls for one username, exactly one
/// returns `Ok`, the rest fail with `ErrorKind::Conflict`.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Fails with `ErrorKind::Conflict` if the username
    /// is taken and `ErrorKind::Database` on any other storage failure.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Look up a user by exact username. Fails with `ErrorKind::NotFound`
    /// if no such user exists.
    async fn find_by_username(&self, username: &str) -> AppResult<User>;

    /// Count stored users.
    async fn count(&self) -> AppResult<u64>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}
