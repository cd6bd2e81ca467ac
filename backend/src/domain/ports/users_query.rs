//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, for picking team members and assignees.
    async fn list_users(&self, authenticated_user: &UserId) -> Result<Vec<User>, Error>;

    /// The user behind a session. `unauthorized` when the account is gone.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
