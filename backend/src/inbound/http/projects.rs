//! Project API handlers.
//!
//! ```text
//! POST   /api/v1/projects              create, caller becomes owner
//! GET    /api/v1/projects              projects the caller owns
//! GET    /api/v1/projects/accessible   owned plus team projects
//! GET    /api/v1/projects/{id}
//! DELETE /api/v1/projects/{id}         owner only
//! PUT    /api/v1/projects/{id}/team    owner only, replaces the team
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CreateProjectRequest;
use crate::domain::{Error, Project, ProjectId, ProjectTitle, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require, text_error};

/// Body of `POST /api/v1/projects`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[schema(example = "Website relaunch")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /api/v1/projects/{id}/team`.
///
/// Ids that are malformed, unknown or the owner's own are ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdateBody {
    #[serde(default)]
    pub team_members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub team_members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: *project.id.as_uuid(),
            title: project.title.to_string(),
            description: project.description,
            owner_id: *project.owner_id.as_uuid(),
            team_members: project
                .team_members
                .iter()
                .map(|member| *member.as_uuid())
                .collect(),
            created_at: project.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectPath {
    id: String,
}

fn parse_project_id(path: web::Path<ProjectPath>) -> Result<ProjectId, Error> {
    parse_id(&path.id, FieldName::new("id"))
}

fn to_responses(projects: Vec<Project>) -> Vec<ProjectResponse> {
    projects.into_iter().map(ProjectResponse::from).collect()
}

/// Keep well-formed ids; the service drops the rest of the invalid ones.
fn parse_team(raw: Vec<String>) -> Vec<UserId> {
    raw.into_iter()
        .filter_map(|value| match UserId::new(&value) {
            Ok(id) => Some(id),
            Err(error) => {
                debug!(%error, "ignoring malformed team member id");
                None
            }
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let body = payload.into_inner();
    let title = require(body.title, FieldName::new("title"))?;
    let request = CreateProjectRequest {
        owner,
        title: ProjectTitle::new(title).map_err(text_error)?,
        description: body.description.unwrap_or_default(),
    };
    let project = state.projects.create(request).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// Projects the caller owns, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Owned projects", body = [ProjectResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listOwnedProjects"
)]
#[get("/projects")]
pub async fn list_owned_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let actor = session.require_user_id()?;
    let projects = state.projects_query.list_owned(&actor).await?;
    Ok(web::Json(to_responses(projects)))
}

/// Projects the caller owns or is a team member of.
#[utoipa::path(
    get,
    path = "/api/v1/projects/accessible",
    responses(
        (status = 200, description = "Visible projects", body = [ProjectResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listAccessibleProjects"
)]
#[get("/projects/accessible")]
pub async fn list_accessible_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let actor = session.require_user_id()?;
    let projects = state.projects_query.list_accessible(&actor).await?;
    Ok(web::Json(to_responses(projects)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProjectPath>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_project_id(path)?;
    let project = state.projects_query.get(&actor, &id).await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

/// Delete a project. Its tasks are left in place.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProjectPath>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_project_id(path)?;
    state.projects.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the team list. An empty list removes every member.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}/team",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = TeamUpdateBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProjectTeam"
)]
#[put("/projects/{id}/team")]
pub async fn update_team(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProjectPath>,
    payload: web::Json<TeamUpdateBody>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_project_id(path)?;
    let members = parse_team(payload.into_inner().team_members);
    let project = state.projects.update_team(&actor, &id, members).await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
