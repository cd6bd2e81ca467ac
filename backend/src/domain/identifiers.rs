//! UUID-backed identifiers for every record kind.
//!
//! Each identifier is its own type so a `TaskId` can never be passed where a
//! `ProjectId` is expected.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Reasons an identifier string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The input was blank.
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    /// The input was not a UUID.
    #[error("{kind} must be a valid UUID, got {value:?}")]
    Invalid { kind: &'static str, value: String },
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse from a string, trimming surrounding whitespace.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let raw = raw.as_ref().trim();
                if raw.is_empty() {
                    return Err(IdentifierError::Empty { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdentifierError::Invalid {
                        kind: $kind,
                        value: raw.to_owned(),
                    })
            }

            /// Mint a fresh random (v4) identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap a UUID that is already known to be valid.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_identifier! {
    /// Registered user.
    ///
    /// # Examples
    /// ```
    /// use taskhub::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    UserId => "user id"
}

uuid_identifier! {
    /// Project.
    ProjectId => "project id"
}

uuid_identifier! {
    /// Task within a project.
    TaskId => "task id"
}

uuid_identifier! {
    /// Notification addressed to one user.
    NotificationId => "notification id"
}

uuid_identifier! {
    /// Comment on a task.
    CommentId => "comment id"
}

uuid_identifier! {
    /// File attached to a task.
    AttachmentId => "attachment id"
}
