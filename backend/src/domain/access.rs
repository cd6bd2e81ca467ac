//! Visibility and capability rules over projects and tasks.
//!
//! Three relations grant access: ownership, team membership and direct
//! assignment. Every function here is pure and infallible; absence of access
//! is `false` or an empty result. Callers at the service boundary turn "not
//! visible" into [`Error::not_found`](crate::domain::Error::not_found) so
//! the existence of a record is never revealed to someone who cannot see it.
//!
//! Capability checks layer on top of visibility:
//!
//! | action                         | rule                              |
//! |--------------------------------|-----------------------------------|
//! | view project                   | owner or team member              |
//! | manage project (team, delete)  | owner                             |
//! | view task                      | can view project, or assignee     |
//! | change task status / delete    | owner of the task's project       |

use std::collections::HashSet;

use super::{Project, ProjectId, Task, UserId};

/// Owner or team member.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use taskhub::domain::access::can_view_project;
/// use taskhub::domain::{Project, ProjectId, ProjectTitle, UserId};
///
/// let owner = UserId::random();
/// let member = UserId::random();
/// let project = Project::new(
///     ProjectId::random(),
///     ProjectTitle::new("Launch").unwrap(),
///     "",
///     owner,
///     Utc::now(),
/// )
/// .with_team([member]);
///
/// assert!(can_view_project(&owner, &project));
/// assert!(can_view_project(&member, &project));
/// assert!(!can_view_project(&UserId::random(), &project));
/// ```
pub fn can_view_project(user: &UserId, project: &Project) -> bool {
    project.is_owned_by(user) || project.has_member(user)
}

/// Owner only. Team members never manage.
pub fn can_manage_project(user: &UserId, project: &Project) -> bool {
    project.is_owned_by(user)
}

/// Projects the user owns or belongs to, in input order.
pub fn visible_projects<'a>(user: &UserId, projects: &'a [Project]) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| can_view_project(user, project))
        .collect()
}

/// Project-level visibility, or the assignment override.
///
/// `project` must be the task's own project.
pub fn can_view_task(user: &UserId, task: &Task, project: &Project) -> bool {
    can_view_project(user, project) || task.is_assigned_to(user)
}

/// Status changes and deletion follow project management, not project
/// visibility: a team member may see and create tasks but not change their
/// status or delete them.
pub fn can_mutate_task(user: &UserId, project: &Project) -> bool {
    can_manage_project(user, project)
}

/// Tasks in any visible project plus tasks assigned to the user anywhere.
///
/// A task whose project is missing from `projects` is still visible to its
/// assignee.
pub fn visible_tasks<'a>(user: &UserId, projects: &[Project], tasks: &'a [Task]) -> Vec<&'a Task> {
    let visible: HashSet<ProjectId> = visible_projects(user, projects)
        .into_iter()
        .map(|project| project.id)
        .collect();
    tasks
        .iter()
        .filter(|task| visible.contains(&task.project_id) || task.is_assigned_to(user))
        .collect()
}
