//! Driving port for task mutations.
//!
//! Successful mutations fan out notifications as a side effect. Failing to
//! store a notification never fails the mutation.

use async_trait::async_trait;

use crate::domain::{Error, NewTask, Task, TaskId, TaskStatus, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a task in a project visible to the actor.
    ///
    /// # Errors
    ///
    /// - `not_found` when the project is absent or not visible.
    /// - `invalid_request` when the assignee is not a registered user.
    async fn create(&self, actor: &UserId, task: NewTask) -> Result<Task, Error>;

    /// Write a new status. Only the project owner may do this.
    async fn update_status(
        &self,
        actor: &UserId,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, Error>;

    /// Delete a task. Only the project owner may do this.
    async fn delete(&self, actor: &UserId, id: &TaskId) -> Result<(), Error>;
}
