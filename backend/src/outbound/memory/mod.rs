//! In-memory adapter implementing every repository port.
//!
//! Backs local runs without `TASKHUB_DATABASE_URL` and the integration
//! tests. All records live behind one [`Mutex`]; each port call takes the
//! lock once, so single-record writes are atomic and nothing spans calls.
//! A poisoned lock surfaces as a `Query` error on the calling port.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::access::can_view_project;
use crate::domain::ports::{
    AttachmentRepository, AttachmentRepositoryError, CommentRepository, CommentRepositoryError,
    NotificationRepository, NotificationRepositoryError, ProjectRepository,
    ProjectRepositoryError, StoredUser, TaskRepository, TaskRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AttachmentId, AttachmentPayload, Comment, CommentContent, CommentId, EmailAddress,
    FileAttachment, Notification, NotificationId, PasswordHash, Project, ProjectId, Task, TaskId,
    TaskStatus, User, UserId,
};

#[derive(Default)]
struct State {
    users: Vec<StoredUser>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    notifications: Vec<Notification>,
    comments: Vec<Comment>,
    attachments: Vec<(FileAttachment, AttachmentPayload)>,
}

/// Process-local record store.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, poisoned: impl FnOnce(String) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state
            .lock()
            .map_err(|_| poisoned("in-memory store lock poisoned".to_owned()))
    }
}

fn newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    records.sort_by_key(|record| std::cmp::Reverse(created_at(record)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state
            .users
            .iter()
            .any(|stored| stored.user.email == user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: password_hash.clone(),
        });
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| &stored.user.id == id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| &stored.user.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        let mut users: Vec<User> = state.users.iter().map(|stored| stored.user.clone()).collect();
        users.sort_by(|a, b| a.display_name.as_ref().cmp(b.display_name.as_ref()));
        Ok(users)
    }

    async fn find_existing(&self, ids: &[UserId]) -> Result<Vec<UserId>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        let known: HashSet<UserId> = state.users.iter().map(|stored| stored.user.id).collect();
        Ok(ids.iter().copied().filter(|id| known.contains(id)).collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        self.lock(ProjectRepositoryError::query)?
            .projects
            .push(project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let state = self.lock(ProjectRepositoryError::query)?;
        Ok(state.projects.iter().find(|project| &project.id == id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let state = self.lock(ProjectRepositoryError::query)?;
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .filter(|project| project.is_owned_by(owner))
            .cloned()
            .collect();
        newest_first(&mut projects, |project| project.created_at);
        Ok(projects)
    }

    async fn list_accessible(
        &self,
        user: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let state = self.lock(ProjectRepositoryError::query)?;
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .filter(|project| can_view_project(user, project))
            .cloned()
            .collect();
        newest_first(&mut projects, |project| project.created_at);
        Ok(projects)
    }

    async fn replace_team(
        &self,
        id: &ProjectId,
        team_members: &[UserId],
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut state = self.lock(ProjectRepositoryError::query)?;
        Ok(state
            .projects
            .iter_mut()
            .find(|project| &project.id == id)
            .map(|project| {
                project.team_members = team_members.to_vec();
                project.clone()
            }))
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut state = self.lock(ProjectRepositoryError::query)?;
        let before = state.projects.len();
        state.projects.retain(|project| &project.id != id);
        Ok(state.projects.len() != before)
    }
}

impl InMemoryStore {
    fn tasks_where(
        &self,
        predicate: impl Fn(&Task) -> bool,
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        let state = self.lock(TaskRepositoryError::query)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        newest_first(&mut tasks, |task| task.created_at);
        Ok(tasks)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        self.lock(TaskRepositoryError::query)?
            .tasks
            .push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        let state = self.lock(TaskRepositoryError::query)?;
        Ok(state.tasks.iter().find(|task| &task.id == id).cloned())
    }

    async fn list_by_project(&self, project: &ProjectId) -> Result<Vec<Task>, TaskRepositoryError> {
        self.tasks_where(|task| &task.project_id == project)
    }

    async fn list_by_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        self.tasks_where(|task| projects.contains(&task.project_id))
    }

    async fn list_visible(
        &self,
        projects: &[ProjectId],
        assignee: &UserId,
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        self.tasks_where(|task| {
            projects.contains(&task.project_id) || task.is_assigned_to(assignee)
        })
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut state = self.lock(TaskRepositoryError::query)?;
        Ok(state
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .map(|task| {
                task.status = status;
                task.clone()
            }))
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskRepositoryError> {
        let mut state = self.lock(TaskRepositoryError::query)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| &task.id != id);
        Ok(state.tasks.len() != before)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.lock(NotificationRepositoryError::query)?
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let state = self.lock(NotificationRepositoryError::query)?;
        let mut notifications: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|notification| &notification.user_id == user)
            .cloned()
            .collect();
        newest_first(&mut notifications, |notification| notification.created_at);
        Ok(notifications)
    }

    async fn count_unread(&self, user: &UserId) -> Result<u64, NotificationRepositoryError> {
        let state = self.lock(NotificationRepositoryError::query)?;
        Ok(state
            .notifications
            .iter()
            .filter(|notification| &notification.user_id == user && !notification.read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        user: &UserId,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut state = self.lock(NotificationRepositoryError::query)?;
        let found = state
            .notifications
            .iter_mut()
            .find(|notification| &notification.id == id && &notification.user_id == user);
        Ok(match found {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        self.lock(CommentRepositoryError::query)?
            .comments
            .push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let state = self.lock(CommentRepositoryError::query)?;
        Ok(state.comments.iter().find(|comment| &comment.id == id).cloned())
    }

    async fn list_by_task(&self, task: &TaskId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock(CommentRepositoryError::query)?;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|comment| &comment.task_id == task)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.created_at);
        Ok(comments)
    }

    async fn update_content(
        &self,
        id: &CommentId,
        content: &CommentContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut state = self.lock(CommentRepositoryError::query)?;
        Ok(state
            .comments
            .iter_mut()
            .find(|comment| &comment.id == id)
            .map(|comment| {
                comment.content = content.clone();
                comment.updated_at = Some(updated_at);
                comment.clone()
            }))
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError> {
        let mut state = self.lock(CommentRepositoryError::query)?;
        let before = state.comments.len();
        state.comments.retain(|comment| &comment.id != id);
        Ok(state.comments.len() != before)
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryStore {
    async fn insert(
        &self,
        attachment: &FileAttachment,
        payload: &AttachmentPayload,
    ) -> Result<(), AttachmentRepositoryError> {
        self.lock(AttachmentRepositoryError::query)?
            .attachments
            .push((attachment.clone(), payload.clone()));
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<FileAttachment>, AttachmentRepositoryError> {
        let state = self.lock(AttachmentRepositoryError::query)?;
        Ok(state
            .attachments
            .iter()
            .find(|(attachment, _)| &attachment.id == id)
            .map(|(attachment, _)| attachment.clone()))
    }

    async fn find_content(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<AttachmentPayload>, AttachmentRepositoryError> {
        let state = self.lock(AttachmentRepositoryError::query)?;
        Ok(state
            .attachments
            .iter()
            .find(|(attachment, _)| &attachment.id == id)
            .map(|(_, payload)| payload.clone()))
    }

    async fn list_by_task(
        &self,
        task: &TaskId,
    ) -> Result<Vec<FileAttachment>, AttachmentRepositoryError> {
        let state = self.lock(AttachmentRepositoryError::query)?;
        let mut attachments: Vec<FileAttachment> = state
            .attachments
            .iter()
            .filter(|(attachment, _)| &attachment.task_id == task)
            .map(|(attachment, _)| attachment.clone())
            .collect();
        newest_first(&mut attachments, |attachment| attachment.created_at);
        Ok(attachments)
    }

    async fn delete(&self, id: &AttachmentId) -> Result<bool, AttachmentRepositoryError> {
        let mut state = self.lock(AttachmentRepositoryError::query)?;
        let before = state.attachments.len();
        state.attachments.retain(|(attachment, _)| &attachment.id != id);
        Ok(state.attachments.len() != before)
    }
}

/// Per-kind record counts, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCounts {
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
    pub notifications: usize,
    pub comments: usize,
    pub attachments: usize,
}

impl InMemoryStore {
    /// Snapshot of how many records of each kind are held.
    pub fn counts(&self) -> StoreCounts {
        match self.state.lock() {
            Ok(state) => StoreCounts {
                users: state.users.len(),
                projects: state.projects.len(),
                tasks: state.tasks.len(),
                notifications: state.notifications.len(),
                comments: state.comments.len(),
                attachments: state.attachments.len(),
            },
            Err(_) => StoreCounts::default(),
        }
    }
}
