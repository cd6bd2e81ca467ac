//! Notification domain services.
//!
//! Explicit notification requests and the recipient's read-side. Drafts
//! produced by task mutations are stored by the task service instead.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    NotificationCommand, NotificationQuery, NotificationRepository, UserRepository,
};
use crate::domain::service_support::{map_notification_error, map_user_error};
use crate::domain::{Error, Notification, NotificationDraft, NotificationId, UserId};

/// Notification service implementing the notification driving ports.
#[derive(Clone)]
pub struct NotificationService<N, U> {
    notifications: Arc<N>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<N, U> NotificationService<N, U> {
    /// Create a new service over the notification and user repositories.
    pub fn new(notifications: Arc<N>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<N, U> NotificationCommand for NotificationService<N, U>
where
    N: NotificationRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        draft: NotificationDraft,
    ) -> Result<Notification, Error> {
        self.users
            .find_by_id(&draft.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let notification = draft.into_notification(NotificationId::random(), self.clock.utc());
        self.notifications
            .insert(&notification)
            .await
            .map_err(map_notification_error)?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            sender_id = %actor,
            "created notification"
        );
        Ok(notification)
    }

    async fn mark_read(&self, actor: &UserId, id: &NotificationId) -> Result<(), Error> {
        let found = self
            .notifications
            .mark_read(id, actor)
            .await
            .map_err(map_notification_error)?;
        if found {
            Ok(())
        } else {
            Err(Error::not_found("notification not found"))
        }
    }
}

#[async_trait]
impl<N, U> NotificationQuery for NotificationService<N, U>
where
    N: NotificationRepository,
    U: UserRepository,
{
    async fn list(&self, actor: &UserId) -> Result<Vec<Notification>, Error> {
        self.notifications
            .list_for_user(actor)
            .await
            .map_err(map_notification_error)
    }

    async fn unread_count(&self, actor: &UserId) -> Result<u64, Error> {
        self.notifications
            .count_unread(actor)
            .await
            .map_err(map_notification_error)
    }
}
