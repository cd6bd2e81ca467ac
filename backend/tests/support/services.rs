//! Service-level harness shared by the behaviour suites.
//!
//! Steps are synchronous, so the world owns a current-thread runtime and
//! blocks on each service call. Users are addressed by display name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use taskhub::domain::ports::CreateProjectRequest;
use taskhub::domain::{
    Error, NewTask, Project, ProjectId, ProjectTitle, Registration, Task, TaskId, TaskStatus,
    TaskTitle, UserId,
};
use taskhub::inbound::http::state::{HttpState, Repositories};
use taskhub::outbound::credentials::BcryptCredentialHasher;
use taskhub::outbound::memory::InMemoryStore;
use taskhub::test_support::MutableClock;
use tokio::runtime::Runtime;

pub struct ServiceWorld {
    runtime: Runtime,
    pub state: HttpState,
    pub clock: Arc<MutableClock>,
    users: RefCell<HashMap<String, UserId>>,
    projects: RefCell<HashMap<String, ProjectId>>,
    tasks: RefCell<HashMap<String, TaskId>>,
    pub last_error: RefCell<Option<Error>>,
}

impl ServiceWorld {
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MutableClock::fixed());
        let state = HttpState::from_repositories(
            Repositories::shared(&store),
            Arc::new(BcryptCredentialHasher::with_cost(4)),
            clock.clone(),
        );
        Self {
            runtime,
            state,
            clock,
            users: RefCell::new(HashMap::new()),
            projects: RefCell::new(HashMap::new()),
            tasks: RefCell::new(HashMap::new()),
            last_error: RefCell::new(None),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    pub fn register(&self, name: &str) -> UserId {
        let email = format!("{}@example.com", name.to_lowercase());
        let registration =
            Registration::try_from_parts(name, &email, "correct horse battery", None)
                .expect("valid registration");
        let user = self
            .block_on(self.state.accounts.register(registration))
            .expect("registration succeeds");
        self.users.borrow_mut().insert(name.to_owned(), user.id);
        user.id
    }

    pub fn user(&self, name: &str) -> UserId {
        *self.users.borrow().get(name).expect("registered user")
    }

    pub fn create_project(&self, owner: &str, title: &str) -> Project {
        let request = CreateProjectRequest {
            owner: self.user(owner),
            title: ProjectTitle::new(title).expect("valid title"),
            description: String::new(),
        };
        let project = self
            .block_on(self.state.projects.create(request))
            .expect("project created");
        self.projects
            .borrow_mut()
            .insert(title.to_owned(), project.id);
        project
    }

    pub fn project(&self, title: &str) -> ProjectId {
        *self.projects.borrow().get(title).expect("known project")
    }

    pub fn set_team(&self, owner: &str, project: &str, members: &[&str]) -> Result<Project, Error> {
        let members = members.iter().map(|name| self.user(name)).collect();
        self.block_on(
            self.state
                .projects
                .update_team(&self.user(owner), &self.project(project), members),
        )
    }

    pub fn create_task(
        &self,
        actor: &str,
        project: &str,
        title: &str,
        assignee: Option<&str>,
        status: TaskStatus,
    ) -> Result<Task, Error> {
        let task = NewTask {
            title: TaskTitle::new(title).expect("valid title"),
            description: String::new(),
            project_id: self.project(project),
            assigned_to: assignee.map(|name| self.user(name)),
            due_date: None,
            status,
        };
        let created = self.block_on(self.state.tasks.create(&self.user(actor), task))?;
        self.tasks.borrow_mut().insert(title.to_owned(), created.id);
        Ok(created)
    }

    /// Create an unassigned `To Do` task due at `due_date`.
    pub fn create_task_due(
        &self,
        actor: &str,
        project: &str,
        title: &str,
        due_date: DateTime<Utc>,
    ) -> Result<Task, Error> {
        let task = NewTask {
            title: TaskTitle::new(title).expect("valid title"),
            description: String::new(),
            project_id: self.project(project),
            assigned_to: None,
            due_date: Some(due_date),
            status: TaskStatus::ToDo,
        };
        let created = self.block_on(self.state.tasks.create(&self.user(actor), task))?;
        self.tasks.borrow_mut().insert(title.to_owned(), created.id);
        Ok(created)
    }

    pub fn task(&self, title: &str) -> TaskId {
        *self.tasks.borrow().get(title).expect("known task")
    }

    /// Keep the error, if any, for a later `then` step.
    pub fn record<T>(&self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => {
                *self.last_error.borrow_mut() = None;
                Some(value)
            }
            Err(error) => {
                *self.last_error.borrow_mut() = Some(error);
                None
            }
        }
    }
}
