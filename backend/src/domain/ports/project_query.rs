//! Driving port for project reads.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Projects the actor owns.
    async fn list_owned(&self, actor: &UserId) -> Result<Vec<Project>, Error>;

    /// Projects the actor owns or belongs to.
    async fn list_accessible(&self, actor: &UserId) -> Result<Vec<Project>, Error>;

    /// One project. `not_found` when absent or not visible to the actor.
    async fn get(&self, actor: &UserId, id: &ProjectId) -> Result<Project, Error>;
}
