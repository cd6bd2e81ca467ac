//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Comment, CommentContent, CommentId, Error, TaskId, UserId};

/// Request to comment on a task, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub task_id: TaskId,
    pub content: CommentContent,
    pub parent_id: Option<CommentId>,
}

/// Domain use-case port for comment mutations.
///
/// Every operation first requires the comment's task to be visible to the
/// actor (`not_found` otherwise). Editing and deleting are reserved to the
/// author (`forbidden` otherwise).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// `invalid_request` when the parent is missing or on another task.
    async fn add(&self, actor: &UserId, request: AddCommentRequest) -> Result<Comment, Error>;

    async fn edit(
        &self,
        actor: &UserId,
        id: &CommentId,
        content: CommentContent,
    ) -> Result<Comment, Error>;

    async fn delete(&self, actor: &UserId, id: &CommentId) -> Result<(), Error>;
}
