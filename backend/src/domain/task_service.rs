//! Task domain services.
//!
//! Every operation resolves visibility first. Creation and status changes
//! then hand their before/after pair to the
//! [`notification_dispatcher`](crate::domain::notification_dispatcher), and
//! each resulting draft is stored on its own. A draft that fails to store is
//! logged and dropped; the mutation has already succeeded.
//!
//! Status changes and deletion are reserved to the project owner, while
//! team members may create and read tasks.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::access::{can_view_project, visible_tasks};
use crate::domain::notification_dispatcher::{TaskEvent, on_task_event};
use crate::domain::ports::{
    NotificationRepository, ProjectRepository, TaskCommand, TaskQuery, TaskRepository,
    UserRepository,
};
use crate::domain::service_support::{
    TaskInProject, load_visible_project, load_visible_task, map_project_error, map_task_error,
    map_user_error, task_not_found,
};
use crate::domain::{
    Error, NewTask, NotificationDraft, NotificationId, ProjectId, Task, TaskId, TaskStatus,
    UserId,
};

/// Task service implementing the task driving ports.
#[derive(Clone)]
pub struct TaskService<T, P, U, N> {
    tasks: Arc<T>,
    projects: Arc<P>,
    users: Arc<U>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<T, P, U, N> TaskService<T, P, U, N> {
    /// Create a new service over its repositories.
    pub fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        users: Arc<U>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
            notifications,
            clock,
        }
    }
}

impl<T, P, U, N> TaskService<T, P, U, N>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn load_managed(&self, actor: &UserId, id: &TaskId) -> Result<TaskInProject, Error> {
        let loaded =
            load_visible_task(self.tasks.as_ref(), self.projects.as_ref(), actor, id).await?;
        if loaded.is_managed_by(actor) {
            Ok(loaded)
        } else {
            Err(Error::forbidden("only the project owner may do this"))
        }
    }

    async fn ensure_registered_assignee(&self, assignee: Option<UserId>) -> Result<(), Error> {
        let Some(assignee) = assignee else {
            return Ok(());
        };
        let found = self
            .users
            .find_by_id(&assignee)
            .await
            .map_err(map_user_error)?;
        if found.is_some() {
            return Ok(());
        }
        Err(
            Error::invalid_request("assignee is not a registered user").with_details(json!({
                "field": "assignedTo",
                "code": "unknown_user",
                "value": assignee.to_string(),
            })),
        )
    }

    async fn deliver(&self, drafts: Vec<NotificationDraft>) {
        let now = self.clock.utc();
        for draft in drafts {
            let notification = draft.into_notification(NotificationId::random(), now);
            if let Err(error) = self.notifications.insert(&notification).await {
                warn!(
                    user_id = %notification.user_id,
                    kind = %notification.kind,
                    %error,
                    "dropping notification that failed to persist"
                );
            }
        }
    }
}

#[async_trait]
impl<T, P, U, N> TaskCommand for TaskService<T, P, U, N>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn create(&self, actor: &UserId, task: NewTask) -> Result<Task, Error> {
        load_visible_project(self.projects.as_ref(), actor, &task.project_id).await?;
        self.ensure_registered_assignee(task.assigned_to).await?;

        let task = task.into_task(TaskId::random(), *actor, self.clock.utc());
        self.tasks.insert(&task).await.map_err(map_task_error)?;
        info!(task_id = %task.id, project_id = %task.project_id, "created task");

        self.deliver(on_task_event(TaskEvent::Created { task: &task }, actor))
            .await;
        Ok(task)
    }

    async fn update_status(
        &self,
        actor: &UserId,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, Error> {
        let before = self.load_managed(actor, id).await?.task;
        let after = self
            .tasks
            .update_status(id, status)
            .await
            .map_err(map_task_error)?
            .ok_or_else(task_not_found)?;
        info!(task_id = %id, from = %before.status, to = %after.status, "updated task status");

        let event = TaskEvent::StatusChanged {
            before: &before,
            after: &after,
        };
        self.deliver(on_task_event(event, actor)).await;
        Ok(after)
    }

    async fn delete(&self, actor: &UserId, id: &TaskId) -> Result<(), Error> {
        self.load_managed(actor, id).await?;
        let deleted = self.tasks.delete(id).await.map_err(map_task_error)?;
        if !deleted {
            return Err(task_not_found());
        }
        info!(task_id = %id, "deleted task");
        Ok(())
    }
}

#[async_trait]
impl<T, P, U, N> TaskQuery for TaskService<T, P, U, N>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn list(&self, actor: &UserId, project: Option<ProjectId>) -> Result<Vec<Task>, Error> {
        let Some(project_id) = project else {
            let accessible = self
                .projects
                .list_accessible(actor)
                .await
                .map_err(map_project_error)?;
            let ids: Vec<ProjectId> = accessible.iter().map(|project| project.id).collect();
            let candidates = self
                .tasks
                .list_visible(&ids, actor)
                .await
                .map_err(map_task_error)?;
            return Ok(visible_tasks(actor, &accessible, &candidates)
                .into_iter()
                .cloned()
                .collect());
        };

        let project = self
            .projects
            .find_by_id(&project_id)
            .await
            .map_err(map_project_error)?;
        let tasks = self
            .tasks
            .list_by_project(&project_id)
            .await
            .map_err(map_task_error)?;
        if project.is_some_and(|project| can_view_project(actor, &project)) {
            return Ok(tasks);
        }

        let assigned: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.is_assigned_to(actor))
            .collect();
        if assigned.is_empty() {
            Err(Error::not_found("project not found"))
        } else {
            Ok(assigned)
        }
    }

    async fn get(&self, actor: &UserId, id: &TaskId) -> Result<Task, Error> {
        load_visible_task(self.tasks.as_ref(), self.projects.as_ref(), actor, id)
            .await
            .map(|loaded| loaded.task)
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
