//! Driving port for attachment mutations.

use async_trait::async_trait;

use crate::domain::{AttachmentId, Error, FileAttachment, NewAttachment, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentCommand: Send + Sync {
    /// Store a validated upload on a task visible to the actor.
    async fn upload(
        &self,
        actor: &UserId,
        attachment: NewAttachment,
    ) -> Result<FileAttachment, Error>;

    /// Delete an attachment. Allowed for the uploader and the project owner.
    async fn delete(&self, actor: &UserId, id: &AttachmentId) -> Result<(), Error>;
}
