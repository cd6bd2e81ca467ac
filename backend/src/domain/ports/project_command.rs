//! Driving port for project mutations.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, ProjectTitle, UserId};

/// Request to create a project owned by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub owner: UserId,
    pub title: ProjectTitle,
    pub description: String,
}

/// Domain use-case port for project mutations.
///
/// Management operations report `not_found` when the actor cannot see the
/// project and `forbidden` when they can see it but do not own it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a project with an empty team.
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error>;

    /// Replace the team list. Unknown users, the owner and duplicates are
    /// dropped; an empty list clears the team.
    async fn update_team(
        &self,
        actor: &UserId,
        id: &ProjectId,
        members: Vec<UserId>,
    ) -> Result<Project, Error>;

    /// Delete the project record. Tasks and their children are kept.
    async fn delete(&self, actor: &UserId, id: &ProjectId) -> Result<(), Error>;
}
