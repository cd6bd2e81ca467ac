//! Task records and the closed status set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectId, TaskId, TaskTitle, UserId};

/// Workflow state of a task. No other values exist.
///
/// The wire and display form is the human label (`"To Do"`,
/// `"In Progress"`, `"Done"`).
///
/// # Examples
/// ```
/// use taskhub::domain::TaskStatus;
///
/// let status: TaskStatus = "In Progress".parse().unwrap();
/// assert_eq!(status, TaskStatus::InProgress);
/// assert_eq!(TaskStatus::Done.to_string(), "Done");
/// assert!("Blocked".parse::<TaskStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of To Do, In Progress, Done; got {0:?}")]
pub struct ParseTaskStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| ParseTaskStatusError(s.to_owned()))
    }
}

/// A unit of work inside exactly one project.
///
/// ## Invariants
/// - `project_id` and `created_by` never change after creation.
/// - only `status` is mutable through the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: String,
    pub project_id: ProjectId,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task is assigned to `user`.
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assigned_to.as_ref() == Some(user)
    }

    /// Overdue means a due date strictly before `as_of` on a task that is
    /// not done. A late but finished task is never overdue.
    pub fn is_overdue(&self, as_of: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < as_of)
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: String,
    pub project_id: ProjectId,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

impl NewTask {
    /// Materialise the task as created by `created_by` at `created_at`.
    pub fn into_task(self, id: TaskId, created_by: UserId, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            project_id: self.project_id,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
            status: self.status,
            created_by,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn task(status: TaskStatus, due_date: Option<DateTime<Utc>>) -> Task {
        NewTask {
            title: TaskTitle::new("Draft").expect("valid title"),
            description: String::new(),
            project_id: ProjectId::random(),
            assigned_to: None,
            due_date,
            status,
        }
        .into_task(TaskId::random(), UserId::random(), Utc::now())
    }

    #[rstest]
    #[case(TaskStatus::ToDo, "To Do")]
    #[case(TaskStatus::InProgress, "In Progress")]
    #[case(TaskStatus::Done, "Done")]
    fn labels_parse_back(#[case] status: TaskStatus, #[case] label: &str) {
        assert_eq!(status.label(), label);
        assert_eq!(label.parse::<TaskStatus>(), Ok(status));
    }

    #[rstest]
    #[case("todo")]
    #[case("done")]
    #[case("")]
    fn unknown_labels_are_rejected(#[case] label: &str) {
        assert!(label.parse::<TaskStatus>().is_err());
    }

    #[rstest]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&TaskStatus::InProgress).expect("serialises");
        assert_eq!(json, "\"In Progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"To Do\"").expect("deserialises");
        assert_eq!(parsed, TaskStatus::ToDo);
        assert!(serde_json::from_str::<TaskStatus>("\"Blocked\"").is_err());
    }

    #[rstest]
    #[case(TaskStatus::ToDo, Some(-1), true)]
    #[case(TaskStatus::InProgress, Some(-1), true)]
    #[case(TaskStatus::Done, Some(-1), false)]
    #[case(TaskStatus::ToDo, Some(1), false)]
    #[case(TaskStatus::ToDo, Some(0), false)]
    #[case(TaskStatus::ToDo, None, false)]
    fn overdue_rules(
        as_of: DateTime<Utc>,
        #[case] status: TaskStatus,
        #[case] due_offset_hours: Option<i64>,
        #[case] expected: bool,
    ) {
        let due = due_offset_hours.map(|hours| as_of + Duration::hours(hours));
        assert_eq!(task(status, due).is_overdue(as_of), expected);
    }
}
