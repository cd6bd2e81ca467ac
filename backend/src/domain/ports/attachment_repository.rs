//! Port abstraction for file attachment persistence.
use async_trait::async_trait;

use crate::domain::{AttachmentId, AttachmentPayload, FileAttachment, TaskId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by attachment repository adapters.
    pub enum AttachmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "attachment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "attachment repository query failed: {message}",
    }
}

/// Attachment storage. Metadata and content are read separately so listings
/// never load payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn insert(
        &self,
        attachment: &FileAttachment,
        payload: &AttachmentPayload,
    ) -> Result<(), AttachmentRepositoryError>;

    async fn find_by_id(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<FileAttachment>, AttachmentRepositoryError>;

    async fn find_content(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<AttachmentPayload>, AttachmentRepositoryError>;

    /// Metadata for `task`, newest first.
    async fn list_by_task(
        &self,
        task: &TaskId,
    ) -> Result<Vec<FileAttachment>, AttachmentRepositoryError>;

    async fn delete(&self, id: &AttachmentId) -> Result<bool, AttachmentRepositoryError>;
}
