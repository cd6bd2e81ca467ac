//! Credentials and registration input.
//!
//! Handlers build these from raw strings before touching a service, so the
//! services only ever see validated values. Passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, RoleLabel, UserValidationError};

/// Shortest accepted password at registration, in characters.
pub const PASSWORD_MIN: usize = 8;
/// Longest accepted password at registration, in characters.
pub const PASSWORD_MAX: usize = 128;

/// Invalid login or registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was blank or malformed.
    Email(UserValidationError),
    /// Display name was blank or malformed.
    DisplayName(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password length is outside the accepted range.
    PasswordLength { min: usize, max: usize },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(inner) | Self::DisplayName(inner) => fmt::Display::fmt(inner, f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordLength { min, max } => {
                write!(f, "password must be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised (see [`EmailAddress`]).
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use taskhub::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let email = EmailAddress::new(email).map_err(CredentialValidationError::Email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password as typed by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub role: RoleLabel,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration input. A blank or missing role falls back
    /// to the default label.
    pub fn try_from_parts(
        display_name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        let display_name =
            DisplayName::new(display_name).map_err(CredentialValidationError::DisplayName)?;
        let email = EmailAddress::new(email).map_err(CredentialValidationError::Email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        let length = password.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
            return Err(CredentialValidationError::PasswordLength {
                min: PASSWORD_MIN,
                max: PASSWORD_MAX,
            });
        }
        Ok(Self {
            display_name,
            email,
            role: RoleLabel::new(role),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Password to hash before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Opaque stored credential digest produced by a
/// [`CredentialHasher`](crate::domain::ports::CredentialHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded digest as produced or stored by an adapter.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("not-an-email", "pw")]
    fn login_rejects_bad_emails(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("must fail");
        assert!(matches!(err, CredentialValidationError::Email(_)));
    }

    #[rstest]
    fn login_rejects_blank_password() {
        let err = LoginCredentials::try_from_parts("ada@example.com", "")
            .expect_err("must fail");
        assert_eq!(err, CredentialValidationError::EmptyPassword);
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("ada@example.com", " pass word ")
            .expect("valid credentials");
        assert_eq!(creds.password(), " pass word ");
    }

    #[rstest]
    #[case("short".to_owned())]
    #[case("p".repeat(PASSWORD_MAX + 1))]
    fn registration_bounds_password_length(#[case] password: String) {
        let err = Registration::try_from_parts("Ada", "ada@example.com", &password, None)
            .expect_err("must fail");
        assert_eq!(
            err,
            CredentialValidationError::PasswordLength {
                min: PASSWORD_MIN,
                max: PASSWORD_MAX
            }
        );
    }

    #[rstest]
    fn registration_defaults_role() {
        let registration =
            Registration::try_from_parts("Ada", "ada@example.com", "correct horse", Some(""))
                .expect("valid registration");
        assert_eq!(registration.role.as_ref(), "Team Member");
        assert_eq!(registration.password(), "correct horse");
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("secret-digest");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
