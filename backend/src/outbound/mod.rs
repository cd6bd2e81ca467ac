//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel with a `bb8` pool.
//! - **memory**: a process-local store implementing every repository port,
//!   used when no database is configured and by the integration tests.
//! - **credentials**: salted SHA-256 [`CredentialHasher`] adapter.
//!
//! Adapters translate between domain records and storage representations
//! and carry no business rules.
//!
//! [`CredentialHasher`]: crate::domain::ports::CredentialHasher

pub mod credentials;
pub mod memory;
pub mod persistence;
