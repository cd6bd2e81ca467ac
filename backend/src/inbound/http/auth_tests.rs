//! Tests for registration and session handlers.

use super::*;
use crate::inbound::http::test_utils::{TEST_PASSWORD, api_app, in_memory_state, register};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

#[actix_web::test]
async fn registering_opens_a_session() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;

    let (user, cookie) = register(&app, "Ada Lovelace", "Ada@Example.com").await;
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, "Team Member");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let current: UserResponse = actix_test::read_body_json(res).await;
    assert_eq!(current.id, user.id);
}

#[actix_web::test]
async fn duplicate_emails_conflict() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    register(&app, "Ada", "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({"name": "Imposter", "email": "ADA@example.com", "password": TEST_PASSWORD}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn short_passwords_are_rejected_with_field_details() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "short"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "password");
    assert_eq!(body["details"]["code"], "invalid_password");
}

#[actix_web::test]
async fn login_with_the_wrong_password_is_unauthorised() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    register(&app, "Ada", "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "not the password"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_with_the_right_password_sets_a_cookie() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let (registered, _) = register(&app, "Ada", "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": TEST_PASSWORD}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.response().cookies().any(|cookie| cookie.name() == "session"));
    let user: UserResponse = actix_test::read_body_json(res).await;
    assert_eq!(user.id, registered.id);
}

#[actix_web::test]
async fn missing_login_fields_are_reported() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "ada@example.com"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "password");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn logout_clears_the_session_cookie() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let (_, cookie) = register(&app, "Ada", "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let removal = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie");
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn user_listing_requires_a_session() {
    let (state, _, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let (_, cookie) = register(&app, "Zed", "zed@example.com").await;
    register(&app, "Ada", "ada@example.com").await;

    let anonymous =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/v1/users").to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let users: Vec<UserResponse> = actix_test::read_body_json(res).await;
    let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Zed"]);
}
