//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod analytics;
pub mod auth;
pub mod comments;
pub mod error;
pub mod files;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal segments are registered before their `{id}` siblings so
/// `/projects/accessible` and `/notifications/unread-count` are not captured
/// as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use taskhub::inbound::http::api_services;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(api_services));
/// ```
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(files::UPLOAD_BODY_LIMIT)
            .error_handler(error::json_error_handler),
    )
    .service(auth::register)
    .service(auth::login)
    .service(auth::logout)
    .service(auth::me)
    .service(users::list_users)
    .service(projects::create_project)
    .service(projects::list_owned_projects)
    .service(projects::list_accessible_projects)
    .service(projects::get_project)
    .service(projects::delete_project)
    .service(projects::update_team)
    .service(tasks::create_task)
    .service(tasks::list_tasks)
    .service(tasks::get_task)
    .service(tasks::delete_task)
    .service(tasks::update_task_status)
    .service(notifications::create_notification)
    .service(notifications::list_notifications)
    .service(notifications::unread_count)
    .service(notifications::mark_read)
    .service(comments::add_comment)
    .service(comments::list_comments)
    .service(comments::edit_comment)
    .service(comments::delete_comment)
    .service(files::upload_attachment)
    .service(files::list_attachments)
    .service(files::download_attachment)
    .service(files::delete_attachment)
    .service(analytics::progress)
    .service(analytics::overview);
}
