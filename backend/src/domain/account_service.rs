//! Account domain services.
//!
//! Registration, credential checks and user lookups. Digests are produced
//! and checked through the [`CredentialHasher`] port so the algorithm never
//! leaks into the domain.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AccountCommand, CredentialHasher, UserRepository, UsersQuery};
use crate::domain::service_support::map_user_error;
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Account service implementing the account and user driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service over the user repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(&registration.email)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email already registered"));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User {
            id: UserId::random(),
            display_name: registration.display_name,
            email: registration.email,
            role: registration.role,
            created_at: self.clock.utc(),
        };
        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            debug!(user_id = %stored.user.id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user)
    }
}

#[async_trait]
impl<U, H> UsersQuery for AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn list_users(&self, _authenticated_user: &UserId) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_user_error)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
