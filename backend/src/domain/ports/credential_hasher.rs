//! Port for deriving and checking credential digests.
//!
//! The algorithm is an adapter concern; the domain only hashes on
//! registration and verifies on login.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while deriving a digest.
    pub enum CredentialHasherError {
        /// The adapter could not produce a digest.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Derive a fresh salted digest for `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError>;

    /// Check `password` against a stored digest. Malformed digests never
    /// verify.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
