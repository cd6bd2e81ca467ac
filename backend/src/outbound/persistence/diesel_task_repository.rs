//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{ProjectId, Task, TaskId, TaskStatus, UserId};

use super::diesel_error_mapping::{self, convert_rows};
use super::models::TaskRow;
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| TaskRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

fn project_uuids(projects: &[ProjectId]) -> Vec<Uuid> {
    projects.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(tasks::table)
            .values(&TaskRow::from(task))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tasks::table
            .filter(tasks::id.eq(id.as_uuid()))
            .select(TaskRow::as_select())
            .first::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Task::try_from)
            .transpose()
            .map_err(TaskRepositoryError::query)
    }

    async fn list_by_project(&self, project: &ProjectId) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::project_id.eq(project.as_uuid()))
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, TaskRepositoryError::query)
    }

    async fn list_by_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::project_id.eq_any(project_uuids(projects)))
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, TaskRepositoryError::query)
    }

    async fn list_visible(
        &self,
        projects: &[ProjectId],
        assignee: &UserId,
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(
                tasks::project_id
                    .eq_any(project_uuids(projects))
                    .or(tasks::assigned_to.eq(assignee.as_uuid())),
            )
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, TaskRepositoryError::query)
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(tasks::table.filter(tasks::id.eq(id.as_uuid())))
            .set(tasks::status.eq(status.label()))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Task::try_from)
            .transpose()
            .map_err(TaskRepositoryError::query)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(tasks::table.filter(tasks::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
