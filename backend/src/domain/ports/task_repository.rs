//! Port abstraction for task persistence.
use async_trait::async_trait;

use crate::domain::{ProjectId, Task, TaskId, TaskStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

/// Task storage. Listing methods return tasks newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError>;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError>;

    async fn list_by_project(&self, project: &ProjectId) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Tasks whose project is in `projects`.
    async fn list_by_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Tasks whose project is in `projects`, or that are assigned to
    /// `assignee`.
    async fn list_visible(
        &self,
        projects: &[ProjectId],
        assignee: &UserId,
    ) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Write a new status. Returns the stored task, or `None` when it no
    /// longer exists.
    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskRepositoryError>;
}
