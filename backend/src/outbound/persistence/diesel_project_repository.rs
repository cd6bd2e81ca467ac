//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, UserId};

use super::diesel_error_mapping::{self, convert_rows};
use super::models::{ProjectRow, uuids};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| {
        ProjectRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    Project::try_from(row).map_err(ProjectRepositoryError::query)
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(projects::table)
            .values(&ProjectRow::from(project))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = projects::table
            .filter(projects::id.eq(id.as_uuid()))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_project).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .order((projects::created_at.desc(), projects::id.desc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, ProjectRepositoryError::query)
    }

    async fn list_accessible(
        &self,
        user: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(
                projects::owner_id
                    .eq(user.as_uuid())
                    .or(projects::team_members.contains(vec![*user.as_uuid()])),
            )
            .order((projects::created_at.desc(), projects::id.desc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, ProjectRepositoryError::query)
    }

    async fn replace_team(
        &self,
        id: &ProjectId,
        team_members: &[UserId],
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(projects::table.filter(projects::id.eq(id.as_uuid())))
            .set(projects::team_members.eq(uuids(team_members)))
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_project).transpose()
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(projects::table.filter(projects::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
