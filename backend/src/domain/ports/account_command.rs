//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and check credentials
//! without knowing how users or digests are stored. Session handling stays
//! in the adapter; the port only answers "who is this".

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Domain use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// `conflict` when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Validate credentials and return the matching user.
    ///
    /// # Errors
    ///
    /// `unauthorized` for an unknown email or a wrong password. The two are
    /// indistinguishable to the caller.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
