//! Port abstraction for project persistence.
use async_trait::async_trait;

use crate::domain::{Project, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Projects owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Projects `user` owns or is a team member of, newest first.
    async fn list_accessible(&self, user: &UserId)
    -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Overwrite the team list. Returns the updated project, or `None` when
    /// it no longer exists. The last write wins.
    async fn replace_team(
        &self,
        id: &ProjectId,
        team_members: &[UserId],
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Remove the project record only. Returns whether a row was deleted.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;
}
