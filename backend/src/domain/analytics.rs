//! Progress statistics derived from task collections.
//!
//! Everything here is a pure computation over records already fetched.
//! `as_of` is supplied by the caller's clock so results are reproducible.
//!
//! Percentages are rounded to two decimals, half away from zero
//! (`f64::round` on the value scaled by 100).

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{Project, ProjectId, Task, TaskStatus};

/// Number of daily points in the creation trend.
pub const TREND_DAYS: i64 = 7;

/// Status counters for a set of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressStats {
    pub total_tasks: u64,
    pub todo_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub overdue_tasks: u64,
    /// `completed / total * 100`, two decimals; `0.0` when there are no
    /// tasks.
    pub completion_rate: f64,
}

impl ProgressStats {
    /// Count `tasks` by status and overdue state at `as_of`.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, as_of: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total_tasks += 1;
            match task.status {
                TaskStatus::ToDo => stats.todo_tasks += 1,
                TaskStatus::InProgress => stats.in_progress_tasks += 1,
                TaskStatus::Done => stats.completed_tasks += 1,
            }
            if task.is_overdue(as_of) {
                stats.overdue_tasks += 1;
            }
        }
        stats.completion_rate = completion_rate(stats.completed_tasks, stats.total_tasks);
        stats
    }

    /// Count for a single status.
    pub fn count_for(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::ToDo => self.todo_tasks,
            TaskStatus::InProgress => self.in_progress_tasks,
            TaskStatus::Done => self.completed_tasks,
        }
    }
}

/// Statistics for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress {
    pub project_id: ProjectId,
    pub project_title: String,
    pub stats: ProgressStats,
}

/// Tasks created on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub tasks_created: u64,
}

/// Statistics across a set of projects.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewStats {
    pub total_projects: u64,
    pub stats: ProgressStats,
    /// Exactly [`TREND_DAYS`] points, oldest first, ending on `as_of`'s day.
    pub recent_tasks_trend: Vec<TrendPoint>,
}

impl OverviewStats {
    /// `(status, count)` for every status, in workflow order.
    pub fn status_distribution(&self) -> [(TaskStatus, u64); 3] {
        TaskStatus::ALL.map(|status| (status, self.stats.count_for(status)))
    }
}

/// Statistics for `project`. Tasks belonging to other projects are ignored.
pub fn project_progress(project: &Project, tasks: &[Task], as_of: DateTime<Utc>) -> ProgressStats {
    let own = tasks.iter().filter(|task| task.project_id == project.id);
    ProgressStats::from_tasks(own, as_of)
}

/// One [`ProjectProgress`] per project, in input order, from a single task
/// collection.
pub fn progress_by_project(
    projects: &[&Project],
    tasks: &[Task],
    as_of: DateTime<Utc>,
) -> Vec<ProjectProgress> {
    let mut by_project: HashMap<ProjectId, Vec<&Task>> = HashMap::new();
    for task in tasks {
        by_project.entry(task.project_id).or_default().push(task);
    }
    projects
        .iter()
        .map(|project| ProjectProgress {
            project_id: project.id,
            project_title: project.title.to_string(),
            stats: ProgressStats::from_tasks(
                by_project.get(&project.id).into_iter().flatten().copied(),
                as_of,
            ),
        })
        .collect()
}

/// Combined statistics for `projects`, counting only tasks that belong to
/// one of them, plus the trailing creation trend.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use taskhub::domain::analytics::{overview, TREND_DAYS};
///
/// let stats = overview(&[], &[], Utc::now());
/// assert_eq!(stats.total_projects, 0);
/// assert_eq!(stats.stats.completion_rate, 0.0);
/// assert_eq!(stats.recent_tasks_trend.len() as i64, TREND_DAYS);
/// ```
pub fn overview(projects: &[Project], tasks: &[Task], as_of: DateTime<Utc>) -> OverviewStats {
    let ids: Vec<ProjectId> = projects.iter().map(|project| project.id).collect();
    let relevant: Vec<&Task> = tasks
        .iter()
        .filter(|task| ids.contains(&task.project_id))
        .collect();
    OverviewStats {
        total_projects: projects.len() as u64,
        stats: ProgressStats::from_tasks(relevant.iter().copied(), as_of),
        recent_tasks_trend: creation_trend(&relevant, as_of),
    }
}

fn creation_trend(tasks: &[&Task], as_of: DateTime<Utc>) -> Vec<TrendPoint> {
    let last_day = as_of.date_naive();
    (0..TREND_DAYS)
        .rev()
        .map(|days_back| {
            let date = last_day - Duration::days(days_back);
            let tasks_created = tasks
                .iter()
                .filter(|task| task.created_at.date_naive() == date)
                .count() as u64;
            TrendPoint {
                date,
                tasks_created,
            }
        })
        .collect()
}

fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_two_decimals(completed as f64 / total as f64 * 100.0)
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
