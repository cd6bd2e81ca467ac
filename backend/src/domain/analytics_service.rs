//! Analytics domain service.
//!
//! Fetches the actor's projects and their tasks, then defers to the pure
//! functions in [`analytics`](crate::domain::analytics). The project and
//! task reads are separate and may observe slightly different instants.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::analytics::{OverviewStats, ProjectProgress, overview, progress_by_project};
use crate::domain::ports::{AnalyticsQuery, ProjectRepository, TaskRepository};
use crate::domain::service_support::{map_project_error, map_task_error};
use crate::domain::{Error, Project, ProjectId, Task, UserId};

/// Analytics service implementing [`AnalyticsQuery`].
#[derive(Clone)]
pub struct AnalyticsService<P, T> {
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<P, T> AnalyticsService<P, T> {
    pub fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            tasks,
            clock,
        }
    }
}

impl<P, T> AnalyticsService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    async fn tasks_of(&self, projects: &[Project]) -> Result<Vec<Task>, Error> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<ProjectId> = projects.iter().map(|project| project.id).collect();
        self.tasks
            .list_by_projects(&ids)
            .await
            .map_err(map_task_error)
    }
}

#[async_trait]
impl<P, T> AnalyticsQuery for AnalyticsService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    async fn progress(&self, actor: &UserId) -> Result<Vec<ProjectProgress>, Error> {
        let projects = self
            .projects
            .list_accessible(actor)
            .await
            .map_err(map_project_error)?;
        let tasks = self.tasks_of(&projects).await?;
        let refs: Vec<&Project> = projects.iter().collect();
        Ok(progress_by_project(&refs, &tasks, self.clock.utc()))
    }

    async fn overview(&self, actor: &UserId) -> Result<OverviewStats, Error> {
        let owned = self
            .projects
            .list_by_owner(actor)
            .await
            .map_err(map_project_error)?;
        let tasks = self.tasks_of(&owned).await?;
        Ok(overview(&owned, &tasks, self.clock.utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockProjectRepository, MockTaskRepository};
    use crate::domain::{NewTask, ProjectTitle, TaskId, TaskStatus, TaskTitle};
    use crate::test_support::{MutableClock, fixture_timestamp};
    use chrono::Duration;
    use rstest::rstest;

    fn project(owner: UserId, title: &str) -> Project {
        Project::new(
            ProjectId::random(),
            ProjectTitle::new(title).expect("title"),
            "",
            owner,
            fixture_timestamp(),
        )
    }

    fn task(project: &Project, status: TaskStatus, days_ago: i64) -> Task {
        NewTask {
            title: TaskTitle::new("Item").expect("title"),
            description: String::new(),
            project_id: project.id,
            assigned_to: None,
            due_date: None,
            status,
        }
        .into_task(
            TaskId::random(),
            project.owner_id,
            fixture_timestamp() - Duration::days(days_ago),
        )
    }

    fn make_service(
        projects: MockProjectRepository,
        tasks: MockTaskRepository,
    ) -> AnalyticsService<MockProjectRepository, MockTaskRepository> {
        AnalyticsService::new(
            Arc::new(projects),
            Arc::new(tasks),
            Arc::new(MutableClock::fixed()),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn progress_covers_every_accessible_project() {
        let actor = UserId::random();
        let owned = project(actor, "Mine");
        let joined = project(UserId::random(), "Theirs").with_team([actor]);
        let tasks = vec![
            task(&owned, TaskStatus::Done, 0),
            task(&joined, TaskStatus::ToDo, 0),
            task(&joined, TaskStatus::Done, 0),
        ];
        let listed = vec![owned.clone(), joined.clone()];
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_accessible()
            .times(1)
            .return_once(move |_| Ok(listed));
        let mut task_repo = MockTaskRepository::new();
        task_repo
            .expect_list_by_projects()
            .times(1)
            .return_once(move |_| Ok(tasks));

        let progress = make_service(projects, task_repo)
            .progress(&actor)
            .await
            .expect("progress");

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].project_id, owned.id);
        assert_eq!(progress[0].stats.completion_rate, 100.0);
        assert_eq!(progress[1].project_title, "Theirs");
        assert_eq!(progress[1].stats.completion_rate, 50.0);
    }

    #[rstest]
    #[tokio::test]
    async fn overview_without_projects_skips_the_task_lookup() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_by_owner()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let mut tasks = MockTaskRepository::new();
        tasks.expect_list_by_projects().times(0);

        let stats = make_service(projects, tasks)
            .overview(&UserId::random())
            .await
            .expect("overview");

        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.recent_tasks_trend.len(), 7);
        assert_eq!(
            stats.recent_tasks_trend.last().map(|point| point.date),
            Some(fixture_timestamp().date_naive())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn overview_counts_owned_projects_only() {
        let actor = UserId::random();
        let owned = project(actor, "Mine");
        let tasks = vec![
            task(&owned, TaskStatus::InProgress, 1),
            task(&owned, TaskStatus::Done, 0),
        ];
        let listed = vec![owned];
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_by_owner()
            .times(1)
            .return_once(move |_| Ok(listed));
        let mut task_repo = MockTaskRepository::new();
        task_repo
            .expect_list_by_projects()
            .times(1)
            .return_once(move |_| Ok(tasks));

        let stats = make_service(projects, task_repo)
            .overview(&actor)
            .await
            .expect("overview");

        assert_eq!(stats.total_projects, 1);
        assert_eq!(stats.stats.total_tasks, 2);
        assert_eq!(stats.stats.in_progress_tasks, 1);
        let created: Vec<u64> = stats
            .recent_tasks_trend
            .iter()
            .map(|point| point.tasks_created)
            .collect();
        assert_eq!(created, vec![0, 0, 0, 0, 0, 1, 1]);
    }
}
