//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented
//! by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod analytics_query;
mod attachment_command;
mod attachment_query;
mod attachment_repository;
mod comment_command;
mod comment_query;
mod comment_repository;
mod credential_hasher;
mod notification_command;
mod notification_query;
mod notification_repository;
mod project_command;
mod project_query;
mod project_repository;
mod task_command;
mod task_query;
mod task_repository;
mod user_repository;
mod users_query;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use analytics_query::AnalyticsQuery;
#[cfg(test)]
pub use analytics_query::MockAnalyticsQuery;
pub use attachment_command::AttachmentCommand;
#[cfg(test)]
pub use attachment_command::MockAttachmentCommand;
#[cfg(test)]
pub use attachment_query::MockAttachmentQuery;
pub use attachment_query::{AttachmentDownload, AttachmentQuery};
#[cfg(test)]
pub use attachment_repository::MockAttachmentRepository;
pub use attachment_repository::{AttachmentRepository, AttachmentRepositoryError};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{AddCommentRequest, CommentCommand};
pub use comment_query::CommentQuery;
#[cfg(test)]
pub use comment_query::MockCommentQuery;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use notification_command::MockNotificationCommand;
pub use notification_command::NotificationCommand;
#[cfg(test)]
pub use notification_query::MockNotificationQuery;
pub use notification_query::NotificationQuery;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use project_command::MockProjectCommand;
pub use project_command::{CreateProjectRequest, ProjectCommand};
#[cfg(test)]
pub use project_query::MockProjectQuery;
pub use project_query::ProjectQuery;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use task_command::MockTaskCommand;
pub use task_command::TaskCommand;
#[cfg(test)]
pub use task_query::MockTaskQuery;
pub use task_query::TaskQuery;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredUser, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
