//! Task comment handlers.
//!
//! ```text
//! POST   /api/v1/comments              comment or reply on a visible task
//! GET    /api/v1/comments?taskId=      oldest first
//! PUT    /api/v1/comments/{id}         author only
//! DELETE /api/v1/comments/{id}         author only
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::AddCommentRequest;
use crate::domain::{Comment, CommentContent, CommentId, Error, TaskId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_id, require, text_error,
};

/// Body of `POST /api/v1/comments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentBody {
    pub task_id: Option<String>,
    #[schema(example = "Looks good to me")]
    pub content: Option<String>,
    /// Comment being replied to; must belong to the same task.
    pub parent_id: Option<String>,
}

/// Body of `PUT /api/v1/comments/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EditCommentBody {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CommentListQuery {
    /// Task whose comments are listed.
    task_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Set once the comment has been edited.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            task_id: *comment.task_id.as_uuid(),
            author_id: *comment.author_id.as_uuid(),
            content: comment.content.to_string(),
            parent_id: comment.parent_id.map(|id| *id.as_uuid()),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommentPath {
    id: String,
}

fn parse_content(raw: Option<String>) -> Result<CommentContent, Error> {
    let raw = require(raw, FieldName::new("content"))?;
    CommentContent::new(raw).map_err(text_error)
}

fn parse_add(body: AddCommentBody) -> Result<AddCommentRequest, Error> {
    let task_field = FieldName::new("taskId");
    let task_id = require(body.task_id, task_field)?;
    Ok(AddCommentRequest {
        task_id: parse_id::<TaskId>(&task_id, task_field)?,
        content: parse_content(body.content)?,
        parent_id: parse_optional_id::<CommentId>(
            body.parent_id.as_deref(),
            FieldName::new("parentId"),
        )?,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = AddCommentBody,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Task not visible", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddCommentBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let request = parse_add(payload.into_inner())?;
    let comment = state.comments.add(&actor, request).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/comments",
    params(CommentListQuery),
    responses(
        (status = 200, description = "Comments on the task, oldest first", body = [CommentResponse]),
        (status = 400, description = "Missing or malformed task id", body = ErrorSchema),
        (status = 404, description = "Task not visible", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CommentListQuery>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let actor = session.require_user_id()?;
    let task_field = FieldName::new("taskId");
    let raw = require(query.into_inner().task_id, task_field)?;
    let task_id = parse_id::<TaskId>(&raw, task_field)?;
    let comments = state.comments_query.list(&actor, &task_id).await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment id")),
    request_body = EditCommentBody,
    responses(
        (status = 200, description = "Comment edited", body = CommentResponse),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Comment not visible", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[put("/comments/{id}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
    payload: web::Json<EditCommentBody>,
) -> ApiResult<web::Json<CommentResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_id::<CommentId>(&path.id, FieldName::new("id"))?;
    let content = parse_content(payload.into_inner().content)?;
    let comment = state.comments.edit(&actor, &id, content).await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

/// Replies to a deleted comment stay in place.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Comment not visible", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_id::<CommentId>(&path.id, FieldName::new("id"))?;
    state.comments.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
