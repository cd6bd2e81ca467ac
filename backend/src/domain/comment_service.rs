//! Comment domain services.
//!
//! Comments inherit visibility from their task. Replies reference a parent
//! on the same task; deleting a parent leaves its replies in place.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AddCommentRequest, CommentCommand, CommentQuery, CommentRepository, ProjectRepository,
    TaskRepository,
};
use crate::domain::service_support::{load_visible_task, map_comment_error, rename_not_found};
use crate::domain::{Comment, CommentContent, CommentId, Error, TaskId, UserId};

fn comment_not_found() -> Error {
    Error::not_found("comment not found")
}

/// Comment service implementing the comment driving ports.
#[derive(Clone)]
pub struct CommentService<C, T, P> {
    comments: Arc<C>,
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C, T, P> CommentService<C, T, P> {
    /// Create a new service over its repositories.
    pub fn new(comments: Arc<C>, tasks: Arc<T>, projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            tasks,
            projects,
            clock,
        }
    }
}

impl<C, T, P> CommentService<C, T, P>
where
    C: CommentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Load a comment whose task the actor can see, then require authorship.
    async fn load_authored(&self, actor: &UserId, id: &CommentId) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)?;
        load_visible_task(
            self.tasks.as_ref(),
            self.projects.as_ref(),
            actor,
            &comment.task_id,
        )
        .await
        .map_err(|error| rename_not_found(error, comment_not_found))?;
        if comment.is_authored_by(actor) {
            Ok(comment)
        } else {
            Err(Error::forbidden("only the author may change this comment"))
        }
    }

    async fn ensure_parent_on_task(&self, parent: &CommentId, task: &TaskId) -> Result<(), Error> {
        let parent_task = self
            .comments
            .find_by_id(parent)
            .await
            .map_err(map_comment_error)?
            .map(|comment| comment.task_id);
        if parent_task.as_ref() == Some(task) {
            return Ok(());
        }
        Err(
            Error::invalid_request("parent comment must exist on the same task").with_details(
                json!({
                    "field": "parentId",
                    "code": "invalid_parent",
                    "value": parent.to_string(),
                }),
            ),
        )
    }
}

#[async_trait]
impl<C, T, P> CommentCommand for CommentService<C, T, P>
where
    C: CommentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn add(&self, actor: &UserId, request: AddCommentRequest) -> Result<Comment, Error> {
        load_visible_task(
            self.tasks.as_ref(),
            self.projects.as_ref(),
            actor,
            &request.task_id,
        )
        .await?;
        if let Some(parent) = &request.parent_id {
            self.ensure_parent_on_task(parent, &request.task_id).await?;
        }

        let comment = Comment {
            id: CommentId::random(),
            task_id: request.task_id,
            author_id: *actor,
            content: request.content,
            parent_id: request.parent_id,
            created_at: self.clock.utc(),
            updated_at: None,
        };
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, task_id = %comment.task_id, "added comment");
        Ok(comment)
    }

    async fn edit(
        &self,
        actor: &UserId,
        id: &CommentId,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        self.load_authored(actor, id).await?;
        self.comments
            .update_content(id, &content, self.clock.utc())
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)
    }

    async fn delete(&self, actor: &UserId, id: &CommentId) -> Result<(), Error> {
        self.load_authored(actor, id).await?;
        let deleted = self.comments.delete(id).await.map_err(map_comment_error)?;
        if !deleted {
            return Err(comment_not_found());
        }
        info!(comment_id = %id, "deleted comment");
        Ok(())
    }
}

#[async_trait]
impl<C, T, P> CommentQuery for CommentService<C, T, P>
where
    C: CommentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn list(&self, actor: &UserId, task_id: &TaskId) -> Result<Vec<Comment>, Error> {
        load_visible_task(self.tasks.as_ref(), self.projects.as_ref(), actor, task_id).await?;
        self.comments
            .list_by_task(task_id)
            .await
            .map_err(map_comment_error)
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
