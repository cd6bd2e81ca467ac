//! Selects the repository backend behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use taskhub::inbound::http::state::{HttpState, Repositories};
use taskhub::outbound::credentials::BcryptCredentialHasher;
use taskhub::outbound::memory::InMemoryStore;
use taskhub::outbound::persistence::{
    DbPool, DieselAttachmentRepository, DieselCommentRepository, DieselNotificationRepository,
    DieselProjectRepository, DieselTaskRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselProjectRepository,
    DieselTaskRepository,
    DieselNotificationRepository,
    DieselCommentRepository,
    DieselAttachmentRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        attachments: Arc::new(DieselAttachmentRepository::new(pool.clone())),
    }
}

fn build_with_clock(pool: Option<&DbPool>, clock: Arc<dyn Clock>) -> HttpState {
    let hasher = Arc::new(BcryptCredentialHasher::default());
    match pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            HttpState::from_repositories(diesel_repositories(pool), hasher, clock)
        }
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_repositories(Repositories::shared(&store), hasher, clock)
        }
    }
}

/// Wire the services over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_with_clock(
        config.db_pool.as_ref(),
        Arc::new(DefaultClock),
    ))
}
