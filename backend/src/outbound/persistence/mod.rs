//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository port has a `Diesel*Repository` adapter sharing one
//! [`DbPool`]. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; rows are revalidated through
//! the domain constructors on the way out, and an invalid row surfaces as
//! the port's `Query` error.
//!
//! # Example
//!
//! ```ignore
//! use taskhub::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/taskhub")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! ```

mod diesel_attachment_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_notification_repository;
mod diesel_project_repository;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_attachment_repository::DieselAttachmentRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
