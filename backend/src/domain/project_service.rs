//! Project domain services.
//!
//! Visibility follows [`access`](crate::domain::access): a project the actor
//! cannot see is reported as missing, and management is reserved to the
//! owner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::access::can_manage_project;
use crate::domain::ports::{
    CreateProjectRequest, ProjectCommand, ProjectQuery, ProjectRepository, UserRepository,
};
use crate::domain::service_support::{
    load_visible_project, map_project_error, map_user_error, project_not_found,
};
use crate::domain::{Error, Project, ProjectId, UserId, normalise_team};

/// Project service implementing the project driving ports.
#[derive(Clone)]
pub struct ProjectService<P, U> {
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> ProjectService<P, U> {
    /// Create a new service over the project and user repositories.
    pub fn new(projects: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            users,
            clock,
        }
    }
}

impl<P, U> ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn load_managed(&self, actor: &UserId, id: &ProjectId) -> Result<Project, Error> {
        let project = load_visible_project(self.projects.as_ref(), actor, id).await?;
        if can_manage_project(actor, &project) {
            Ok(project)
        } else {
            Err(Error::forbidden("only the project owner may do this"))
        }
    }

    async fn resolve_team(&self, owner: &UserId, members: Vec<UserId>) -> Result<Vec<UserId>, Error> {
        let candidates = normalise_team(owner, members);
        if candidates.is_empty() {
            return Ok(candidates);
        }
        let registered = self
            .users
            .find_existing(&candidates)
            .await
            .map_err(map_user_error)?;
        if registered.len() < candidates.len() {
            debug!(
                dropped = candidates.len() - registered.len(),
                "dropping unknown team members"
            );
        }
        Ok(candidates
            .into_iter()
            .filter(|candidate| registered.contains(candidate))
            .collect())
    }
}

#[async_trait]
impl<P, U> ProjectCommand for ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error> {
        let project = Project::new(
            ProjectId::random(),
            request.title,
            request.description,
            request.owner,
            self.clock.utc(),
        );
        self.projects
            .insert(&project)
            .await
            .map_err(map_project_error)?;
        info!(project_id = %project.id, owner_id = %project.owner_id, "created project");
        Ok(project)
    }

    async fn update_team(
        &self,
        actor: &UserId,
        id: &ProjectId,
        members: Vec<UserId>,
    ) -> Result<Project, Error> {
        let project = self.load_managed(actor, id).await?;
        let team = self.resolve_team(&project.owner_id, members).await?;
        let updated = self
            .projects
            .replace_team(id, &team)
            .await
            .map_err(map_project_error)?
            .ok_or_else(project_not_found)?;
        info!(project_id = %id, members = team.len(), "updated project team");
        Ok(updated)
    }

    async fn delete(&self, actor: &UserId, id: &ProjectId) -> Result<(), Error> {
        self.load_managed(actor, id).await?;
        let deleted = self.projects.delete(id).await.map_err(map_project_error)?;
        if !deleted {
            return Err(project_not_found());
        }
        info!(project_id = %id, "deleted project");
        Ok(())
    }
}

#[async_trait]
impl<P, U> ProjectQuery for ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn list_owned(&self, actor: &UserId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_by_owner(actor)
            .await
            .map_err(map_project_error)
    }

    async fn list_accessible(&self, actor: &UserId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_accessible(actor)
            .await
            .map_err(map_project_error)
    }

    async fn get(&self, actor: &UserId, id: &ProjectId) -> Result<Project, Error> {
        load_visible_project(self.projects.as_ref(), actor, id).await
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
