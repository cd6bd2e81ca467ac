//! Task API handlers.
//!
//! ```text
//! POST   /api/v1/tasks                 create in a visible project
//! GET    /api/v1/tasks?projectId=      visible tasks, optionally one project
//! GET    /api/v1/tasks/{id}
//! DELETE /api/v1/tasks/{id}            project owner only
//! PUT    /api/v1/tasks/{id}/status     project owner only
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, NewTask, ProjectId, Task, TaskId, TaskStatus, TaskTitle, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TaskStatusSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_id, parse_optional_rfc3339_timestamp, require,
    status_error, text_error,
};

/// Body of `POST /api/v1/tasks`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    #[schema(example = "Draft release notes")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub project_id: Option<String>,
    /// Must name a registered user when present.
    pub assigned_to: Option<String>,
    /// RFC 3339 timestamp.
    #[schema(example = "2026-06-01T17:00:00Z")]
    pub due_date: Option<String>,
    /// Defaults to "To Do".
    #[schema(example = "To Do")]
    pub status: Option<String>,
}

/// Body of `PUT /api/v1/tasks/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateBody {
    #[schema(example = "In Progress")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// Restrict the listing to one project.
    project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub project_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    #[schema(value_type = TaskStatusSchema)]
    pub status: TaskStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: *task.id.as_uuid(),
            title: task.title.to_string(),
            description: task.description,
            project_id: *task.project_id.as_uuid(),
            assigned_to: task.assigned_to.map(|id| *id.as_uuid()),
            due_date: task.due_date,
            status: task.status,
            created_by: *task.created_by.as_uuid(),
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TaskPath {
    id: String,
}

fn parse_task_id(path: web::Path<TaskPath>) -> Result<TaskId, Error> {
    parse_id(&path.id, FieldName::new("id"))
}

fn parse_status(raw: &str) -> Result<TaskStatus, Error> {
    raw.trim().parse::<TaskStatus>().map_err(status_error)
}

fn parse_new_task(body: CreateTaskBody) -> Result<NewTask, Error> {
    let title = require(body.title, FieldName::new("title"))?;
    let project_id = require(body.project_id, FieldName::new("projectId"))?;
    Ok(NewTask {
        title: TaskTitle::new(title).map_err(text_error)?,
        description: body.description.unwrap_or_default(),
        project_id: parse_id::<ProjectId>(&project_id, FieldName::new("projectId"))?,
        assigned_to: parse_optional_id::<UserId>(
            body.assigned_to.as_deref(),
            FieldName::new("assignedTo"),
        )?,
        due_date: parse_optional_rfc3339_timestamp(
            body.due_date.as_deref(),
            FieldName::new("dueDate"),
        )?,
        status: body
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or_default(),
    })
}

/// Create a task. Assigning someone else notifies them.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskBody,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid request or unknown assignee", body = ErrorSchema),
        (status = 404, description = "Project absent or not visible", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTaskBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let draft = parse_new_task(payload.into_inner())?;
    let task = state.tasks.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// Visible tasks, newest first.
///
/// With `projectId`, a project the caller cannot see still yields the tasks
/// assigned to them; with none of those the result is 404.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks", body = [TaskResponse]),
        (status = 400, description = "Malformed project id", body = ErrorSchema),
        (status = 404, description = "Nothing visible in that project", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<TaskListQuery>,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let actor = session.require_user_id()?;
    let project = parse_optional_id::<ProjectId>(
        query.project_id.as_deref(),
        FieldName::new("projectId"),
    )?;
    let tasks = state.tasks_query.list(&actor, project).await?;
    Ok(web::Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
) -> ApiResult<web::Json<TaskResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_task_id(path)?;
    let task = state.tasks_query.get(&actor, &id).await?;
    Ok(web::Json(TaskResponse::from(task)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the project owner", body = ErrorSchema),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_task_id(path)?;
    state.tasks.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move a task to another status. Creator and assignee are notified unless
/// they made the change.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}/status",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = StatusUpdateBody,
    responses(
        (status = 200, description = "Updated task", body = TaskResponse),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 403, description = "Not the project owner", body = ErrorSchema),
        (status = 404, description = "Absent or not visible", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTaskStatus"
)]
#[put("/tasks/{id}/status")]
pub async fn update_task_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
    payload: web::Json<StatusUpdateBody>,
) -> ApiResult<web::Json<TaskResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_task_id(path)?;
    let raw = require(payload.into_inner().status, FieldName::new("status"))?;
    let status = parse_status(&raw)?;
    let task = state.tasks.update_status(&actor, &id, status).await?;
    Ok(web::Json(TaskResponse::from(task)))
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
