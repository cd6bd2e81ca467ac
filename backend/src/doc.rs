//! OpenAPI document for the REST API.
//!
//! Domain types do not derive `ToSchema`; their wire shapes are registered
//! through the wrappers in [`crate::inbound::http::schemas`]. The document is
//! served by Swagger UI in debug builds and written out by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::analytics::{
    OverviewResponse, ProgressStatsResponse, ProjectProgressResponse, StatusDistributionResponse,
    TrendPointResponse,
};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::comments::{AddCommentBody, CommentResponse, EditCommentBody};
use crate::inbound::http::files::{AttachmentContentResponse, AttachmentResponse, UploadBody};
use crate::inbound::http::notifications::{
    CreateNotificationBody, NotificationResponse, UnreadCountResponse,
};
use crate::inbound::http::projects::{CreateProjectBody, ProjectResponse, TeamUpdateBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TaskStatusSchema};
use crate::inbound::http::tasks::{CreateTaskBody, StatusUpdateBody, TaskResponse};
use crate::inbound::http::users::UserResponse;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Taskhub API",
        description = "Collaborative projects, tasks, comments, attachments and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::users::list_users,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::list_owned_projects,
        crate::inbound::http::projects::list_accessible_projects,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::update_team,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::tasks::update_task_status,
        crate::inbound::http::notifications::create_notification,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::unread_count,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::edit_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::files::upload_attachment,
        crate::inbound::http::files::list_attachments,
        crate::inbound::http::files::download_attachment,
        crate::inbound::http::files::delete_attachment,
        crate::inbound::http::analytics::progress,
        crate::inbound::http::analytics::overview,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TaskStatusSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        CreateProjectBody,
        TeamUpdateBody,
        ProjectResponse,
        CreateTaskBody,
        StatusUpdateBody,
        TaskResponse,
        CreateNotificationBody,
        NotificationResponse,
        UnreadCountResponse,
        AddCommentBody,
        EditCommentBody,
        CommentResponse,
        UploadBody,
        AttachmentResponse,
        AttachmentContentResponse,
        ProgressStatsResponse,
        ProjectProgressResponse,
        StatusDistributionResponse,
        TrendPointResponse,
        OverviewResponse,
    )),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "users", description = "Registered users"),
        (name = "projects", description = "Projects and their teams"),
        (name = "tasks", description = "Tasks within projects"),
        (name = "notifications", description = "Per-user inbox"),
        (name = "comments", description = "Threaded task comments"),
        (name = "files", description = "Task attachments"),
        (name = "analytics", description = "Progress statistics"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in aliased schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");
        for field in ["code", "message", "traceId", "details"] {
            assert!(object_has_field(error, field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/v1/auth/register")]
    #[case("/api/v1/projects/{id}/team")]
    #[case("/api/v1/tasks/{id}/status")]
    #[case("/api/v1/notifications/unread-count")]
    #[case("/api/v1/comments/{id}")]
    #[case("/api/v1/files/{id}")]
    #[case("/api/v1/analytics/overview")]
    #[case("/health/ready")]
    fn routes_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} undocumented");
    }

    #[rstest]
    fn user_schema_never_exposes_the_password_hash() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponse").expect("UserResponse schema");
        assert!(object_has_field(user, "createdAt"));
        assert!(!object_has_field(user, "passwordHash"));
    }
}
