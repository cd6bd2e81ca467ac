//! Driving port for comment reads.

use async_trait::async_trait;

use crate::domain::{Comment, Error, TaskId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Comments on a visible task, oldest first.
    async fn list(&self, actor: &UserId, task_id: &TaskId) -> Result<Vec<Comment>, Error>;
}
