//! Domain primitives, access rules and services.
//!
//! Purpose: define the strongly typed records of the task tracker, the pure
//! rules that decide visibility ([`access`]), notification fan-out
//! ([`notification_dispatcher`]) and progress statistics ([`analytics`]),
//! and the services that drive them through the ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Record types: User, Project, Task, Notification, Comment,
//!   FileAttachment, each with validated newtype fields.
//! - Services: one per aggregate, each implementing its driving ports.

pub mod access;
pub mod analytics;
mod attachment;
mod attachment_service;
mod account_service;
mod analytics_service;
mod auth;
mod comment;
mod comment_service;
pub mod error;
mod identifiers;
pub mod notification_dispatcher;
mod notification;
mod notification_service;
pub mod ports;
mod project;
mod project_service;
mod service_support;
mod task;
mod task_service;
mod text;
mod trace_id;
mod user;

pub use self::account_service::AccountService;
pub use self::analytics_service::AnalyticsService;
pub use self::attachment::{
    AttachmentPayload, AttachmentValidationError, FILENAME_MAX, FileAttachment,
    MAX_ATTACHMENT_BYTES, NewAttachment,
};
pub use self::attachment_service::AttachmentService;
pub use self::auth::{
    CredentialValidationError, LoginCredentials, PASSWORD_MAX, PASSWORD_MIN, PasswordHash,
    Registration,
};
pub use self::comment::Comment;
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identifiers::{
    AttachmentId, CommentId, IdentifierError, NotificationId, ProjectId, TaskId, UserId,
};
pub use self::notification::{Notification, NotificationDraft, NotificationKind};
pub use self::notification_service::NotificationService;
pub use self::project::{Project, normalise_team};
pub use self::project_service::ProjectService;
pub use self::task::{NewTask, ParseTaskStatusError, Task, TaskStatus};
pub use self::task_service::TaskService;
pub use self::text::{CommentContent, ProjectTitle, TaskTitle, TextValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    DEFAULT_ROLE, DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, EmailAddress, RoleLabel, User,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use taskhub::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
