//! Driving port for explicit notification writes.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationDraft, NotificationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Store a caller-supplied notification for any registered user.
    /// `not_found` when the target user does not exist.
    async fn create(&self, actor: &UserId, draft: NotificationDraft)
    -> Result<Notification, Error>;

    /// Mark one of the actor's notifications read. Idempotent.
    async fn mark_read(&self, actor: &UserId, id: &NotificationId) -> Result<(), Error>;
}
