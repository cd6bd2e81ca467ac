//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::inbound::http::api_services;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::inbound::http::users::UserResponse;
use crate::outbound::credentials::BcryptCredentialHasher;
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

/// Session middleware with a fresh key and an insecure cookie named
/// `session`, suitable for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Services wired over a fresh in-memory store and a fixed clock.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryStore>, Arc<MutableClock>) {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(MutableClock::fixed());
    let state = HttpState::from_repositories(
        Repositories::shared(&store),
        Arc::new(BcryptCredentialHasher::with_cost(4)),
        clock.clone(),
    );
    (state, store, clock)
}

/// App serving every API route over `state`, behind the test session
/// middleware.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(api_services))
}

/// Register `name` with a fixed password and return the new user plus the
/// session cookie.
pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> (UserResponse, Cookie<'static>) {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({"name": name, "email": email, "password": TEST_PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration succeeds");
    let cookie = session_cookie(&response);
    let user = actix_test::read_body_json(response).await;
    (user, cookie)
}

/// Password used by [`register`].
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Create a project owned by the session holder plus one task in it, and
/// return both ids.
pub async fn project_with_task(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> (Uuid, Uuid) {
    let project = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/projects")
            .cookie(cookie.clone())
            .set_json(json!({"title": "Launch"}))
            .to_request(),
    )
    .await;
    assert_eq!(project.status(), StatusCode::CREATED, "project created");
    let project: Value = actix_test::read_body_json(project).await;
    let project_id = json_uuid(&project["id"]);

    let task = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/tasks")
            .cookie(cookie.clone())
            .set_json(json!({"title": "Write copy", "projectId": project_id}))
            .to_request(),
    )
    .await;
    assert_eq!(task.status(), StatusCode::CREATED, "task created");
    let task: Value = actix_test::read_body_json(task).await;
    (project_id, json_uuid(&task["id"]))
}

fn json_uuid(value: &Value) -> Uuid {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("uuid string")
}
