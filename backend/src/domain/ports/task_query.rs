//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, Task, TaskId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Tasks visible to the actor, optionally narrowed to one project.
    ///
    /// With a project filter the actor sees every task when the project is
    /// visible, otherwise only their own assignments; `not_found` when that
    /// leaves nothing.
    async fn list(&self, actor: &UserId, project: Option<ProjectId>) -> Result<Vec<Task>, Error>;

    /// One task. `not_found` unless visible to the actor.
    async fn get(&self, actor: &UserId, id: &TaskId) -> Result<Task, Error>;
}
