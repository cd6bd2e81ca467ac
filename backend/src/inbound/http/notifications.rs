//! Notification API handlers.
//!
//! ```text
//! POST /api/v1/notifications                 send to any registered user
//! GET  /api/v1/notifications                 caller's inbox, newest first
//! GET  /api/v1/notifications/unread-count
//! PUT  /api/v1/notifications/{id}/read
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Error, Notification, NotificationDraft, NotificationId, NotificationKind, ProjectId, TaskId,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ValidationCode, field_error, parse_id, parse_optional_id, require,
};

/// Body of `POST /api/v1/notifications`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationBody {
    pub user_id: Option<String>,
    #[schema(example = "Reminder")]
    pub title: Option<String>,
    #[schema(example = "Stand-up moved to 10:00")]
    pub message: Option<String>,
    /// Built-in tags or any non-blank custom tag.
    #[serde(rename = "type")]
    #[schema(example = "due_date")]
    pub kind: Option<String>,
    pub task_id: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub task_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            user_id: *notification.user_id.as_uuid(),
            title: notification.title,
            message: notification.message,
            kind: notification.kind.as_str().to_owned(),
            task_id: notification.task_id.map(|id| *id.as_uuid()),
            project_id: notification.project_id.map(|id| *id.as_uuid()),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
struct NotificationPath {
    id: String,
}

fn non_blank(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let value = require(value, field)?;
    if value.trim().is_empty() {
        return Err(field_error(field, ValidationCode::Empty, "must not be empty"));
    }
    Ok(value)
}

fn parse_draft(body: CreateNotificationBody) -> Result<NotificationDraft, Error> {
    let user_id = require(body.user_id, FieldName::new("userId"))?;
    let kind_field = FieldName::new("type");
    let kind = require(body.kind, kind_field)?;
    Ok(NotificationDraft {
        user_id: parse_id::<UserId>(&user_id, FieldName::new("userId"))?,
        title: non_blank(body.title, FieldName::new("title"))?,
        message: non_blank(body.message, FieldName::new("message"))?,
        kind: NotificationKind::parse(&kind).ok_or_else(|| {
            field_error(kind_field, ValidationCode::InvalidKind, "type must not be blank")
        })?,
        task_id: parse_optional_id::<TaskId>(body.task_id.as_deref(), FieldName::new("taskId"))?,
        project_id: parse_optional_id::<ProjectId>(
            body.project_id.as_deref(),
            FieldName::new("projectId"),
        )?,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    request_body = CreateNotificationBody,
    responses(
        (status = 201, description = "Notification stored", body = NotificationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Recipient not registered", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "createNotification"
)]
#[post("/notifications")]
pub async fn create_notification(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateNotificationBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let draft = parse_draft(payload.into_inner())?;
    let notification = state.notifications.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(NotificationResponse::from(notification)))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Caller's notifications, newest first", body = [NotificationResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let actor = session.require_user_id()?;
    let notifications = state.notifications_query.list(&actor).await?;
    Ok(web::Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Unread notifications", body = UnreadCountResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "unreadNotificationCount"
)]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UnreadCountResponse>> {
    let actor = session.require_user_id()?;
    let count = state.notifications_query.unread_count(&actor).await?;
    Ok(web::Json(UnreadCountResponse { count }))
}

/// Mark one of the caller's notifications as read. Repeating it is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 404, description = "Absent or addressed to someone else", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[put("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<NotificationPath>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_id::<NotificationId>(&path.id, FieldName::new("id"))?;
    state.notifications.mark_read(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
