//! Fan-out of task mutations into notification drafts.
//!
//! The dispatcher is a pure function of the event and the actor. Storing the
//! drafts is the caller's job, and each draft is written independently: one
//! failing write does not stop the others, nor the mutation that caused it.
//! Repeated identical events produce repeated drafts; nothing is
//! deduplicated.

use super::{NotificationDraft, NotificationKind, Task, UserId};

/// Title used for assignment notifications.
pub const ASSIGNMENT_TITLE: &str = "New Task Assignment";
/// Title used for status change notifications.
pub const STATUS_CHANGE_TITLE: &str = "Task Status Updated";

/// A task mutation relevant to notification fan-out.
#[derive(Debug, Clone, Copy)]
pub enum TaskEvent<'a> {
    /// A task was just created.
    Created { task: &'a Task },
    /// A task's status was written; `before` is what the actor observed.
    StatusChanged { before: &'a Task, after: &'a Task },
}

/// Synthesize the drafts for `event` performed by `actor`.
///
/// - Creation with an assignee other than the actor: one `assignment`
///   draft to the assignee.
/// - Status change where the status actually differs: a `status_change`
///   draft to the creator unless they are the actor, and one to the
///   assignee unless they are the actor or the creator.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use taskhub::domain::notification_dispatcher::{on_task_event, TaskEvent};
/// use taskhub::domain::{NewTask, ProjectId, TaskId, TaskStatus, TaskTitle, UserId};
///
/// let creator = UserId::random();
/// let assignee = UserId::random();
/// let task = NewTask {
///     title: TaskTitle::new("Review").unwrap(),
///     description: String::new(),
///     project_id: ProjectId::random(),
///     assigned_to: Some(assignee),
///     due_date: None,
///     status: TaskStatus::ToDo,
/// }
/// .into_task(TaskId::random(), creator, Utc::now());
///
/// let drafts = on_task_event(TaskEvent::Created { task: &task }, &creator);
/// assert_eq!(drafts.len(), 1);
/// assert_eq!(drafts[0].user_id, assignee);
/// ```
pub fn on_task_event(event: TaskEvent<'_>, actor: &UserId) -> Vec<NotificationDraft> {
    match event {
        TaskEvent::Created { task } => assignment_draft(task, actor).into_iter().collect(),
        TaskEvent::StatusChanged { before, after } => status_change_drafts(before, after, actor),
    }
}

fn assignment_draft(task: &Task, actor: &UserId) -> Option<NotificationDraft> {
    let assignee = task.assigned_to.filter(|assignee| assignee != actor)?;
    Some(draft(
        assignee,
        task,
        ASSIGNMENT_TITLE,
        format!("You have been assigned to task: {}", task.title),
        NotificationKind::Assignment,
    ))
}

fn status_change_drafts(before: &Task, after: &Task, actor: &UserId) -> Vec<NotificationDraft> {
    if before.status == after.status {
        return Vec::new();
    }
    let message = format!(
        "Task '{}' status changed from {} to {}",
        after.title, before.status, after.status
    );

    let creator = Some(after.created_by).filter(|creator| creator != actor);
    let assignee = after
        .assigned_to
        .filter(|assignee| assignee != actor && *assignee != after.created_by);

    creator
        .into_iter()
        .chain(assignee)
        .map(|recipient| {
            draft(
                recipient,
                after,
                STATUS_CHANGE_TITLE,
                message.clone(),
                NotificationKind::StatusChange,
            )
        })
        .collect()
}

fn draft(
    user_id: UserId,
    task: &Task,
    title: &str,
    message: String,
    kind: NotificationKind,
) -> NotificationDraft {
    NotificationDraft {
        user_id,
        title: title.to_owned(),
        message,
        kind,
        task_id: Some(task.id),
        project_id: Some(task.project_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, ProjectId, TaskId, TaskStatus, TaskTitle};
    use chrono::Utc;
    use rstest::rstest;

    fn task(creator: UserId, assignee: Option<UserId>, status: TaskStatus) -> Task {
        NewTask {
            title: TaskTitle::new("Quarterly report").expect("valid title"),
            description: String::new(),
            project_id: ProjectId::random(),
            assigned_to: assignee,
            due_date: None,
            status,
        }
        .into_task(TaskId::random(), creator, Utc::now())
    }

    fn with_status(task: &Task, status: TaskStatus) -> Task {
        Task {
            status,
            ..task.clone()
        }
    }

    fn recipients(drafts: &[NotificationDraft]) -> Vec<UserId> {
        drafts.iter().map(|draft| draft.user_id).collect()
    }

    #[rstest]
    fn self_assignment_produces_nothing() {
        let actor = UserId::random();
        let created = task(actor, Some(actor), TaskStatus::ToDo);
        assert!(on_task_event(TaskEvent::Created { task: &created }, &actor).is_empty());
    }

    #[rstest]
    fn unassigned_creation_produces_nothing() {
        let actor = UserId::random();
        let created = task(actor, None, TaskStatus::ToDo);
        assert!(on_task_event(TaskEvent::Created { task: &created }, &actor).is_empty());
    }

    #[rstest]
    fn assigning_someone_else_notifies_them_once() {
        let actor = UserId::random();
        let assignee = UserId::random();
        let created = task(actor, Some(assignee), TaskStatus::ToDo);

        let drafts = on_task_event(TaskEvent::Created { task: &created }, &actor);

        assert_eq!(recipients(&drafts), vec![assignee]);
        let draft = &drafts[0];
        assert_eq!(draft.kind, NotificationKind::Assignment);
        assert_eq!(draft.title, ASSIGNMENT_TITLE);
        assert_eq!(
            draft.message,
            "You have been assigned to task: Quarterly report"
        );
        assert_eq!(draft.task_id, Some(created.id));
        assert_eq!(draft.project_id, Some(created.project_id));
    }

    #[rstest]
    fn creator_changing_their_own_task_produces_nothing() {
        let creator = UserId::random();
        let before = task(creator, None, TaskStatus::ToDo);
        let after = with_status(&before, TaskStatus::InProgress);
        let event = TaskEvent::StatusChanged {
            before: &before,
            after: &after,
        };
        assert!(on_task_event(event, &creator).is_empty());
    }

    #[rstest]
    fn third_party_change_notifies_creator_and_assignee() {
        let creator = UserId::random();
        let assignee = UserId::random();
        let actor = UserId::random();
        let before = task(creator, Some(assignee), TaskStatus::InProgress);
        let after = with_status(&before, TaskStatus::Done);

        let drafts = on_task_event(
            TaskEvent::StatusChanged {
                before: &before,
                after: &after,
            },
            &actor,
        );

        assert_eq!(recipients(&drafts), vec![creator, assignee]);
        for draft in &drafts {
            assert_eq!(draft.kind, NotificationKind::StatusChange);
            assert_eq!(
                draft.message,
                "Task 'Quarterly report' status changed from In Progress to Done"
            );
        }
    }

    #[rstest]
    fn creator_who_is_also_assignee_is_notified_once() {
        let creator = UserId::random();
        let actor = UserId::random();
        let before = task(creator, Some(creator), TaskStatus::ToDo);
        let after = with_status(&before, TaskStatus::Done);
        let drafts = on_task_event(
            TaskEvent::StatusChanged {
                before: &before,
                after: &after,
            },
            &actor,
        );
        assert_eq!(recipients(&drafts), vec![creator]);
    }

    #[rstest]
    fn assignee_acting_notifies_only_the_creator() {
        let creator = UserId::random();
        let assignee = UserId::random();
        let before = task(creator, Some(assignee), TaskStatus::ToDo);
        let after = with_status(&before, TaskStatus::InProgress);
        let drafts = on_task_event(
            TaskEvent::StatusChanged {
                before: &before,
                after: &after,
            },
            &assignee,
        );
        assert_eq!(recipients(&drafts), vec![creator]);
    }

    #[rstest]
    #[case(TaskStatus::ToDo)]
    #[case(TaskStatus::InProgress)]
    #[case(TaskStatus::Done)]
    fn unchanged_status_produces_nothing(#[case] status: TaskStatus) {
        let before = task(UserId::random(), Some(UserId::random()), status);
        let after = before.clone();
        let event = TaskEvent::StatusChanged {
            before: &before,
            after: &after,
        };
        assert!(on_task_event(event, &UserId::random()).is_empty());
    }

    #[rstest]
    fn repeated_transitions_are_not_deduplicated() {
        let creator = UserId::random();
        let actor = UserId::random();
        let before = task(creator, None, TaskStatus::ToDo);
        let after = with_status(&before, TaskStatus::Done);
        let event = TaskEvent::StatusChanged {
            before: &before,
            after: &after,
        };
        let first = on_task_event(event, &actor);
        let second = on_task_event(event, &actor);
        assert_eq!(first, second);
        assert_eq!(first.len() + second.len(), 2);
    }
}
