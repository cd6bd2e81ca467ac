//! File attachment handlers.
//!
//! Payloads travel as standard base64 in JSON bodies, capped at
//! [`MAX_ATTACHMENT_BYTES`] once decoded.
//!
//! ```text
//! POST   /api/v1/files                 upload to a visible task
//! GET    /api/v1/files?taskId=         metadata only
//! GET    /api/v1/files/{id}            metadata plus content
//! DELETE /api/v1/files/{id}            uploader or project owner
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::AttachmentDownload;
use crate::domain::{
    AttachmentId, Error, FileAttachment, MAX_ATTACHMENT_BYTES, NewAttachment, TaskId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, attachment_error, parse_id, require};

/// Body of `POST /api/v1/files`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    pub task_id: Option<String>,
    #[schema(example = "brief.pdf")]
    pub filename: Option<String>,
    #[schema(example = "application/pdf")]
    pub content_type: Option<String>,
    /// Standard base64.
    pub file_data: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttachmentListQuery {
    /// Task whose attachments are listed.
    task_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FileAttachment> for AttachmentResponse {
    fn from(attachment: FileAttachment) -> Self {
        Self {
            id: *attachment.id.as_uuid(),
            task_id: *attachment.task_id.as_uuid(),
            filename: attachment.filename,
            content_type: attachment.content_type,
            size_bytes: attachment.size_bytes,
            uploaded_by: *attachment.uploaded_by.as_uuid(),
            created_at: attachment.created_at,
        }
    }
}

/// Metadata plus the base64 payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentContentResponse {
    #[serde(flatten)]
    pub attachment: AttachmentResponse,
    pub file_data: String,
}

impl From<AttachmentDownload> for AttachmentContentResponse {
    fn from(download: AttachmentDownload) -> Self {
        Self {
            file_data: download.payload.to_base64(),
            attachment: AttachmentResponse::from(download.attachment),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AttachmentPath {
    id: String,
}

fn parse_upload(body: UploadBody) -> Result<NewAttachment, Error> {
    let task_field = FieldName::new("taskId");
    let task_id = parse_id::<TaskId>(&require(body.task_id, task_field)?, task_field)?;
    let filename = require(body.filename, FieldName::new("filename"))?;
    let content_type = require(body.content_type, FieldName::new("contentType"))?;
    let file_data = require(body.file_data, FieldName::new("fileData"))?;
    NewAttachment::try_new(task_id, &filename, &content_type, &file_data).map_err(attachment_error)
}

fn parse_attachment_id(raw: &str) -> Result<AttachmentId, Error> {
    parse_id(raw, FieldName::new("id"))
}

#[utoipa::path(
    post,
    path = "/api/v1/files",
    request_body = UploadBody,
    responses(
        (status = 201, description = "Attachment stored", body = AttachmentResponse),
        (status = 400, description = "Invalid metadata, encoding or size", body = ErrorSchema),
        (status = 404, description = "Task not visible", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "uploadAttachment"
)]
#[post("/files")]
pub async fn upload_attachment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UploadBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let upload = parse_upload(payload.into_inner())?;
    let attachment = state.attachments.upload(&actor, upload).await?;
    Ok(HttpResponse::Created().json(AttachmentResponse::from(attachment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/files",
    params(AttachmentListQuery),
    responses(
        (status = 200, description = "Attachment metadata, oldest first", body = [AttachmentResponse]),
        (status = 400, description = "Missing or malformed task id", body = ErrorSchema),
        (status = 404, description = "Task not visible", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "listAttachments"
)]
#[get("/files")]
pub async fn list_attachments(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AttachmentListQuery>,
) -> ApiResult<web::Json<Vec<AttachmentResponse>>> {
    let actor = session.require_user_id()?;
    let task_field = FieldName::new("taskId");
    let raw = require(query.into_inner().task_id, task_field)?;
    let task_id = parse_id::<TaskId>(&raw, task_field)?;
    let attachments = state.attachments_query.list(&actor, &task_id).await?;
    Ok(web::Json(
        attachments
            .into_iter()
            .map(AttachmentResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/files/{id}",
    params(("id" = Uuid, Path, description = "Attachment id")),
    responses(
        (status = 200, description = "Attachment with content", body = AttachmentContentResponse),
        (status = 404, description = "Attachment not visible", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "downloadAttachment"
)]
#[get("/files/{id}")]
pub async fn download_attachment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AttachmentPath>,
) -> ApiResult<web::Json<AttachmentContentResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_attachment_id(&path.id)?;
    let download = state.attachments_query.download(&actor, &id).await?;
    Ok(web::Json(AttachmentContentResponse::from(download)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/files/{id}",
    params(("id" = Uuid, Path, description = "Attachment id")),
    responses(
        (status = 204, description = "Attachment deleted"),
        (status = 403, description = "Neither uploader nor project owner", body = ErrorSchema),
        (status = 404, description = "Attachment not visible", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "deleteAttachment"
)]
#[delete("/files/{id}")]
pub async fn delete_attachment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AttachmentPath>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_attachment_id(&path.id)?;
    state.attachments.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Largest JSON body the upload route must accept: the base64 expansion of
/// the payload limit plus room for the metadata.
pub const UPLOAD_BODY_LIMIT: usize = MAX_ATTACHMENT_BYTES.div_ceil(3) * 4 + 64 * 1024;

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
