//! Driving port for notification reads.

use async_trait::async_trait;

use crate::domain::{Error, Notification, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    /// The actor's notifications, newest first.
    async fn list(&self, actor: &UserId) -> Result<Vec<Notification>, Error>;

    /// Number of the actor's unread notifications.
    async fn unread_count(&self, actor: &UserId) -> Result<u64, Error>;
}
