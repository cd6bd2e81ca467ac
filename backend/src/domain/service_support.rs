//! Helpers shared by the domain services: port error mapping and loading a
//! task together with the project that decides its visibility.

use crate::domain::access::{can_mutate_task, can_view_project, can_view_task};
use crate::domain::ports::{
    AttachmentRepositoryError, CommentRepositoryError, NotificationRepositoryError,
    ProjectRepository, ProjectRepositoryError, TaskRepository, TaskRepositoryError,
    UserPersistenceError,
};
use crate::domain::{Error, ErrorCode, Project, ProjectId, Task, TaskId, UserId};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("email already registered"),
    }
}

pub(crate) fn map_project_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

pub(crate) fn map_task_error(error: TaskRepositoryError) -> Error {
    match error {
        TaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
    }
}

pub(crate) fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

pub(crate) fn map_attachment_error(error: AttachmentRepositoryError) -> Error {
    match error {
        AttachmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("attachment repository unavailable: {message}"))
        }
        AttachmentRepositoryError::Query { message } => {
            Error::internal(format!("attachment repository error: {message}"))
        }
    }
}

pub(crate) fn project_not_found() -> Error {
    Error::not_found("project not found")
}

pub(crate) fn task_not_found() -> Error {
    Error::not_found("task not found")
}

/// Replace a `not_found` error with `replacement`; other failures pass
/// through unchanged.
pub(crate) fn rename_not_found(error: Error, replacement: impl FnOnce() -> Error) -> Error {
    if error.code() == ErrorCode::NotFound {
        replacement()
    } else {
        error
    }
}

/// A task plus its project. The project is `None` once it has been deleted;
/// such a task stays visible to its assignee only.
#[derive(Debug, Clone)]
pub(crate) struct TaskInProject {
    pub task: Task,
    pub project: Option<Project>,
}

impl TaskInProject {
    pub(crate) fn is_visible_to(&self, user: &UserId) -> bool {
        match &self.project {
            Some(project) => can_view_task(user, &self.task, project),
            None => self.task.is_assigned_to(user),
        }
    }

    pub(crate) fn is_managed_by(&self, user: &UserId) -> bool {
        self.project
            .as_ref()
            .is_some_and(|project| can_mutate_task(user, project))
    }

    pub(crate) fn is_project_owner(&self, user: &UserId) -> bool {
        self.project
            .as_ref()
            .is_some_and(|project| project.is_owned_by(user))
    }
}

/// Load a task the actor may see. Absent and invisible tasks are both
/// `not_found`.
pub(crate) async fn load_visible_task<T, P>(
    tasks: &T,
    projects: &P,
    actor: &UserId,
    id: &TaskId,
) -> Result<TaskInProject, Error>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
{
    let task = tasks
        .find_by_id(id)
        .await
        .map_err(map_task_error)?
        .ok_or_else(task_not_found)?;
    let project = projects
        .find_by_id(&task.project_id)
        .await
        .map_err(map_project_error)?;
    let loaded = TaskInProject { task, project };
    if loaded.is_visible_to(actor) {
        Ok(loaded)
    } else {
        Err(task_not_found())
    }
}

/// Load a project the actor may see. Absent and invisible projects are both
/// `not_found`.
pub(crate) async fn load_visible_project<P>(
    projects: &P,
    actor: &UserId,
    id: &ProjectId,
) -> Result<Project, Error>
where
    P: ProjectRepository + ?Sized,
{
    projects
        .find_by_id(id)
        .await
        .map_err(map_project_error)?
        .filter(|project| can_view_project(actor, project))
        .ok_or_else(project_not_found)
}
