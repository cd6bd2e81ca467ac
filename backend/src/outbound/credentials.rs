//! bcrypt credential digests.
//!
//! Stored form is the modular crypt string produced by `bcrypt`
//! (`$2b$<cost>$<salt+digest>`). The cost is read back from the stored
//! string, so raising [`DEFAULT_COST`] only affects new digests. bcrypt
//! reads at most 72 bytes of a password.

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Work factor for new digests.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// [`CredentialHasher`] backed by bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl Default for BcryptCredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptCredentialHasher {
    /// Hasher producing digests with work factor `cost`, clamped to 4..=31.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }
}

impl CredentialHasher for BcryptCredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| CredentialHasherError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        bcrypt::verify(password, hash.as_str()).unwrap_or(false)
    }
}
