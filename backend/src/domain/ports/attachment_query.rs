//! Driving port for attachment reads.

use async_trait::async_trait;

use crate::domain::{AttachmentId, AttachmentPayload, Error, FileAttachment, TaskId, UserId};

/// Attachment metadata together with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDownload {
    pub attachment: FileAttachment,
    pub payload: AttachmentPayload,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentQuery: Send + Sync {
    /// Metadata of every attachment on a visible task.
    async fn list(&self, actor: &UserId, task_id: &TaskId) -> Result<Vec<FileAttachment>, Error>;

    /// Metadata and content of one attachment on a visible task.
    async fn download(&self, actor: &UserId, id: &AttachmentId)
    -> Result<AttachmentDownload, Error>;
}
