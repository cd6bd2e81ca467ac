//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! records revalidate every field and report failures as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::StoredUser;
use crate::domain::{
    Comment, CommentContent, CommentId, DisplayName, EmailAddress, FileAttachment,
    Notification, NotificationId, NotificationKind, PasswordHash, Project, ProjectId,
    ProjectTitle, RoleLabel, Task, TaskId, TaskStatus, TaskTitle, User, UserId,
};

use super::schema::{comments, file_attachments, notifications, projects, tasks, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row and insert struct for the projects table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub team_members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub project_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub task_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Attachment metadata; the payload column is loaded separately.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = file_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttachmentRow {
    pub id: Uuid,
    pub task_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = file_attachments)]
pub(crate) struct NewAttachmentRow<'a> {
    pub id: Uuid,
    pub task_id: Uuid,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
    pub payload: &'a [u8],
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Row to domain conversions
// ---------------------------------------------------------------------------

impl TryFrom<UserRow> for StoredUser {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let user = User {
            id: UserId::from_uuid(row.id),
            display_name: DisplayName::new(&row.display_name).map_err(|err| err.to_string())?,
            email: EmailAddress::new(&row.email).map_err(|err| err.to_string())?,
            role: RoleLabel::new(Some(&row.role)),
            created_at: row.created_at,
        };
        Ok(Self {
            user,
            password_hash: PasswordHash::new(row.password_hash),
        })
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = String;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::from_uuid(row.id),
            title: ProjectTitle::new(&row.title).map_err(|err| err.to_string())?,
            description: row.description,
            owner_id: UserId::from_uuid(row.owner_id),
            team_members: row.team_members.into_iter().map(UserId::from_uuid).collect(),
            created_at: row.created_at,
        })
    }
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id.as_uuid(),
            title: project.title.to_string(),
            description: project.description.clone(),
            owner_id: *project.owner_id.as_uuid(),
            team_members: uuids(&project.team_members),
            created_at: project.created_at,
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = String;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::from_uuid(row.id),
            title: TaskTitle::new(&row.title).map_err(|err| err.to_string())?,
            description: row.description,
            project_id: ProjectId::from_uuid(row.project_id),
            assigned_to: row.assigned_to.map(UserId::from_uuid),
            due_date: row.due_date,
            status: row.status.parse::<TaskStatus>().map_err(|err| err.to_string())?,
            created_by: UserId::from_uuid(row.created_by),
            created_at: row.created_at,
        })
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: *task.id.as_uuid(),
            title: task.title.to_string(),
            description: task.description.clone(),
            project_id: *task.project_id.as_uuid(),
            assigned_to: task.assigned_to.map(|user| *user.as_uuid()),
            due_date: task.due_date,
            status: task.status.label().to_owned(),
            created_by: *task.created_by.as_uuid(),
            created_at: task.created_at,
        }
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = String;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&row.kind)
            .ok_or_else(|| format!("notification {} has a blank kind", row.id))?;
        Ok(Self {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            title: row.title,
            message: row.message,
            kind,
            task_id: row.task_id.map(TaskId::from_uuid),
            project_id: row.project_id.map(ProjectId::from_uuid),
            read: row.read,
            created_at: row.created_at,
        })
    }
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            user_id: *notification.user_id.as_uuid(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_owned(),
            task_id: notification.task_id.map(|id| *id.as_uuid()),
            project_id: notification.project_id.map(|id| *id.as_uuid()),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = String;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::from_uuid(row.id),
            task_id: TaskId::from_uuid(row.task_id),
            author_id: UserId::from_uuid(row.author_id),
            content: CommentContent::new(&row.content).map_err(|err| err.to_string())?,
            parent_id: row.parent_id.map(CommentId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            task_id: *comment.task_id.as_uuid(),
            author_id: *comment.author_id.as_uuid(),
            content: comment.content.to_string(),
            parent_id: comment.parent_id.map(|id| *id.as_uuid()),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl TryFrom<AttachmentRow> for FileAttachment {
    type Error = String;

    fn try_from(row: AttachmentRow) -> Result<Self, Self::Error> {
        let size_bytes = u64::try_from(row.size_bytes)
            .map_err(|_| format!("attachment {} has a negative size", row.id))?;
        Ok(Self {
            id: crate::domain::AttachmentId::from_uuid(row.id),
            task_id: TaskId::from_uuid(row.task_id),
            filename: row.filename,
            content_type: row.content_type,
            size_bytes,
            uploaded_by: UserId::from_uuid(row.uploaded_by),
            created_at: row.created_at,
        })
    }
}

/// Raw UUIDs for a list of user identifiers.
pub(crate) fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_timestamp;
    use rstest::rstest;

    fn task_row(status: &str) -> TaskRow {
        TaskRow {
            id: Uuid::new_v4(),
            title: "Ship it".to_owned(),
            description: String::new(),
            project_id: Uuid::new_v4(),
            assigned_to: None,
            due_date: None,
            status: status.to_owned(),
            created_by: Uuid::new_v4(),
            created_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[case("To Do", TaskStatus::ToDo)]
    #[case("In Progress", TaskStatus::InProgress)]
    #[case("Done", TaskStatus::Done)]
    fn task_rows_decode_status_labels(#[case] label: &str, #[case] expected: TaskStatus) {
        let task = Task::try_from(task_row(label)).expect("valid row");
        assert_eq!(task.status, expected);
        assert_eq!(TaskRow::from(&task).status, label);
    }

    #[rstest]
    fn unknown_status_labels_are_rejected() {
        let err = Task::try_from(task_row("Blocked")).expect_err("invalid status");
        assert!(err.contains("Blocked"));
    }

    #[rstest]
    fn blank_notification_kinds_are_rejected() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t".to_owned(),
            message: "m".to_owned(),
            kind: " ".to_owned(),
            task_id: None,
            project_id: None,
            read: false,
            created_at: fixture_timestamp(),
        };
        assert!(Notification::try_from(row).is_err());
    }

    #[rstest]
    fn negative_attachment_sizes_are_rejected() {
        let row = AttachmentRow {
            id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            filename: "a.txt".to_owned(),
            content_type: "text/plain".to_owned(),
            size_bytes: -1,
            uploaded_by: Uuid::new_v4(),
            created_at: fixture_timestamp(),
        };
        assert!(FileAttachment::try_from(row).is_err());
    }

    #[rstest]
    fn blank_roles_fall_back_to_the_default() {
        let row = UserRow {
            id: Uuid::new_v4(),
            display_name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: String::new(),
            password_hash: "digest".to_owned(),
            created_at: fixture_timestamp(),
        };
        let stored = StoredUser::try_from(row).expect("valid row");
        assert_eq!(stored.user.role, RoleLabel::default());
        assert_eq!(stored.password_hash, PasswordHash::new("digest"));
    }
}
