//! Port abstraction for comment persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, CommentContent, CommentId, TaskId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Comments on `task`, oldest first.
    async fn list_by_task(&self, task: &TaskId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Replace the content and stamp `updated_at`.
    async fn update_content(
        &self,
        id: &CommentId,
        content: &CommentContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError>;
}
