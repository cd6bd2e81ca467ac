//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockCredentialHasher, MockUserRepository, StoredUser, UserPersistenceError,
};
use crate::domain::{DisplayName, EmailAddress, ErrorCode, PasswordHash, RoleLabel};
use crate::test_support::{MutableClock, fixture_timestamp};

type Service = AccountService<MockUserRepository, MockCredentialHasher>;

fn make_service(users: MockUserRepository, hasher: MockCredentialHasher) -> Service {
    AccountService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(MutableClock::fixed()),
    )
}

#[fixture]
fn registration() -> Registration {
    Registration::try_from_parts("Ada Lovelace", "Ada@Example.com", "correct horse", None)
        .expect("valid registration")
}

fn stored_user() -> StoredUser {
    StoredUser {
        user: User {
            id: UserId::random(),
            display_name: DisplayName::new("Ada Lovelace").expect("display name"),
            email: EmailAddress::new("ada@example.com").expect("email"),
            role: RoleLabel::default(),
            created_at: fixture_timestamp(),
        },
        password_hash: PasswordHash::new("salt$digest"),
    }
}

#[rstest]
#[tokio::test]
async fn register_hashes_and_stores_the_user(registration: Registration) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|user, hash| user.email.as_ref() == "ada@example.com" && hash.as_str() == "digest")
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == "correct horse")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("digest")));

    let user = make_service(users, hasher)
        .register(registration)
        .await
        .expect("registration succeeds");

    assert_eq!(user.display_name.as_ref(), "Ada Lovelace");
    assert_eq!(user.role.as_ref(), "Team Member");
    assert_eq!(user.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn register_rejects_a_taken_email(registration: Registration) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    users.expect_insert().times(0);
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_hash().times(0);

    let error = make_service(users, hasher)
        .register(registration)
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_maps_an_insert_race_to_conflict(registration: Registration) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    users
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::duplicate_email("ada@example.com")));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("digest")));

    let error = make_service(users, hasher)
        .register(registration)
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn authenticate_checks_the_digest(
    #[case] verifies: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let stored = stored_user();
    let expected_id = stored.user.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_const(verifies);
    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", "whatever1").expect("credentials");

    let result = make_service(users, hasher).authenticate(&credentials).await;

    match (expected_error, result) {
        (None, Ok(user)) => assert_eq!(user.id, expected_id),
        (Some(code), Err(error)) => assert_eq!(error.code(), code),
        (expected, actual) => panic!("expected {expected:?}, got {actual:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_unknown_email_without_hashing() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().times(0);
    let credentials =
        LoginCredentials::try_from_parts("nobody@example.com", "whatever1").expect("credentials");

    let error = make_service(users, hasher)
        .authenticate(&credentials)
        .await
        .expect_err("unknown email");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid email or password");
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("broken"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_users_maps_repository_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_list_all()
        .times(1)
        .return_once(move || Err(failure));

    let error = make_service(users, MockCredentialHasher::new())
        .list_users(&UserId::random())
        .await
        .expect_err("repository failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn fetch_user_reports_a_stale_session_as_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = make_service(users, MockCredentialHasher::new())
        .fetch_user(&UserId::random())
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}
