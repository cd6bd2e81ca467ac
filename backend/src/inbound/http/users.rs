//! Users API handlers.
//!
//! ```text
//! GET /api/v1/users
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Public view of a registered user. The credential hash never leaves the
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Team Member")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.display_name.to_string(),
            email: user.email.to_string(),
            role: user.role.as_ref().to_owned(),
            created_at: user.created_at,
        }
    }
}

/// Every registered user, for picking team members and assignees.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Registered users ordered by name", body = [UserResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let user_id = session.require_user_id()?;
    let users = state.users.list_users(&user_id).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, RoleLabel, UserId};
    use crate::test_support::fixture_timestamp;
    use rstest::rstest;

    #[rstest]
    fn responses_expose_profile_fields_in_camel_case() {
        let user = User {
            id: UserId::random(),
            display_name: DisplayName::new("Grace Hopper").expect("name"),
            email: EmailAddress::new("Grace@Example.com").expect("email"),
            role: RoleLabel::default(),
            created_at: fixture_timestamp(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).expect("serialise");

        assert_eq!(json["name"], "Grace Hopper");
        assert_eq!(json["email"], "grace@example.com");
        assert_eq!(json["role"], "Team Member");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_none());
    }
}
