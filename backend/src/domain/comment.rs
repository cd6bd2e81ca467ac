//! Task comments with an optional reply link.

use chrono::{DateTime, Utc};

use super::{CommentContent, CommentId, TaskId, UserId};

/// A comment on a task.
///
/// `parent_id` links a reply to one earlier comment on the same task.
/// Comments are append-only at creation, so a comment can never be its own
/// ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub content: CommentContent,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Whether `user` wrote this comment.
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author_id == user
    }
}
