//! Notification records.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{NotificationId, ProjectId, TaskId, UserId};

const ASSIGNMENT: &str = "assignment";
const STATUS_CHANGE: &str = "status_change";
const COMMENT: &str = "comment";
const FILE_UPLOAD: &str = "file_upload";
const DUE_DATE: &str = "due_date";

/// Classification tag of a notification.
///
/// Built-in tags have dedicated variants; anything else a caller supplies
/// is kept verbatim in [`NotificationKind::Custom`].
///
/// # Examples
/// ```
/// use taskhub::domain::NotificationKind;
///
/// assert_eq!(NotificationKind::parse("status_change"), Some(NotificationKind::StatusChange));
/// assert_eq!(
///     NotificationKind::parse("reminder"),
///     Some(NotificationKind::Custom("reminder".into()))
/// );
/// assert_eq!(NotificationKind::parse("  "), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Assignment,
    StatusChange,
    Comment,
    FileUpload,
    DueDate,
    Custom(String),
}

impl NotificationKind {
    /// Map a tag to a kind. Blank tags are rejected.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let kind = match tag {
            "" => return None,
            ASSIGNMENT => Self::Assignment,
            STATUS_CHANGE => Self::StatusChange,
            COMMENT => Self::Comment,
            FILE_UPLOAD => Self::FileUpload,
            DUE_DATE => Self::DueDate,
            other => Self::Custom(other.to_owned()),
        };
        Some(kind)
    }

    /// Tag as stored and sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Assignment => ASSIGNMENT,
            Self::StatusChange => STATUS_CHANGE,
            Self::Comment => COMMENT,
            Self::FileUpload => FILE_UPLOAD,
            Self::DueDate => DUE_DATE,
            Self::Custom(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub task_id: Option<TaskId>,
    pub project_id: Option<ProjectId>,
}

impl NotificationDraft {
    /// Materialise the draft as an unread notification.
    pub fn into_notification(self, id: NotificationId, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            task_id: self.task_id,
            project_id: self.project_id,
            read: false,
            created_at,
        }
    }
}

/// A stored notification.
///
/// ## Invariants
/// - `read` starts `false` and only ever moves to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub task_id: Option<TaskId>,
    pub project_id: Option<ProjectId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
