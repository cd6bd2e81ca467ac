//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `actix_web::web::Data` and only
//! see driving ports, so they can be exercised with mocks or the in-memory
//! store without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AnalyticsQuery, AttachmentCommand, AttachmentQuery, AttachmentRepository,
    CommentCommand, CommentQuery, CommentRepository, CredentialHasher, NotificationCommand,
    NotificationQuery, NotificationRepository, ProjectCommand, ProjectQuery, ProjectRepository,
    TaskCommand, TaskQuery, TaskRepository, UserRepository, UsersQuery,
};
use crate::domain::{
    AccountService, AnalyticsService, AttachmentService, CommentService, NotificationService,
    ProjectService, TaskService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
    pub notifications_query: Arc<dyn NotificationQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub attachments: Arc<dyn AttachmentCommand>,
    pub attachments_query: Arc<dyn AttachmentQuery>,
    pub analytics: Arc<dyn AnalyticsQuery>,
}

/// Driven adapters the services are built over.
pub struct Repositories<U, P, T, N, C, A> {
    pub users: Arc<U>,
    pub projects: Arc<P>,
    pub tasks: Arc<T>,
    pub notifications: Arc<N>,
    pub comments: Arc<C>,
    pub attachments: Arc<A>,
}

impl<S> Repositories<S, S, S, S, S, S> {
    /// Use one store for every repository port.
    pub fn shared(store: &Arc<S>) -> Self {
        Self {
            users: Arc::clone(store),
            projects: Arc::clone(store),
            tasks: Arc::clone(store),
            notifications: Arc::clone(store),
            comments: Arc::clone(store),
            attachments: Arc::clone(store),
        }
    }
}

impl HttpState {
    /// Wire every domain service over `repositories`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use taskhub::inbound::http::state::{HttpState, Repositories};
    /// use taskhub::outbound::credentials::BcryptCredentialHasher;
    /// use taskhub::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     Repositories::shared(&store),
    ///     Arc::new(BcryptCredentialHasher::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _analytics = state.analytics.clone();
    /// ```
    pub fn from_repositories<U, P, T, N, C, A, H>(
        repositories: Repositories<U, P, T, N, C, A>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: ProjectRepository + 'static,
        T: TaskRepository + 'static,
        N: NotificationRepository + 'static,
        C: CommentRepository + 'static,
        A: AttachmentRepository + 'static,
        H: CredentialHasher + 'static,
    {
        let Repositories {
            users,
            projects,
            tasks,
            notifications,
            comments,
            attachments,
        } = repositories;

        let accounts = Arc::new(AccountService::new(users.clone(), hasher, clock.clone()));
        let project_service = Arc::new(ProjectService::new(
            projects.clone(),
            users.clone(),
            clock.clone(),
        ));
        let task_service = Arc::new(TaskService::new(
            tasks.clone(),
            projects.clone(),
            users.clone(),
            notifications.clone(),
            clock.clone(),
        ));
        let notification_service = Arc::new(NotificationService::new(
            notifications,
            users,
            clock.clone(),
        ));
        let comment_service = Arc::new(CommentService::new(
            comments,
            tasks.clone(),
            projects.clone(),
            clock.clone(),
        ));
        let attachment_service = Arc::new(AttachmentService::new(
            attachments,
            tasks.clone(),
            projects.clone(),
            clock.clone(),
        ));
        let analytics = Arc::new(AnalyticsService::new(projects, tasks, clock));

        Self {
            accounts: accounts.clone(),
            users: accounts,
            projects: project_service.clone(),
            projects_query: project_service,
            tasks: task_service.clone(),
            tasks_query: task_service,
            notifications: notification_service.clone(),
            notifications_query: notification_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
            attachments: attachment_service.clone(),
            attachments_query: attachment_service,
            analytics,
        }
    }
}
