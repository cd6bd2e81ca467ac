//! Request validation helpers shared by the handlers.
//!
//! Every rejection is an `invalid_request` error whose details name the
//! offending wire field and a stable code, plus the rejected value where
//! echoing it is harmless.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{
    AttachmentValidationError, CredentialValidationError, Error, IdentifierError,
    ParseTaskStatusError, TextValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    Empty,
    TooLong,
    InvalidUuid,
    InvalidTimestamp,
    InvalidStatus,
    InvalidEmail,
    InvalidDisplayName,
    InvalidPassword,
    InvalidKind,
    InvalidEncoding,
    TooLarge,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidDisplayName => "invalid_display_name",
            Self::InvalidPassword => "invalid_password",
            Self::InvalidKind => "invalid_kind",
            Self::InvalidEncoding => "invalid_encoding",
            Self::TooLarge => "too_large",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_error_with_value(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "value": value,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Unwrap a field the request must carry.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse an identifier, reporting failures against `field`.
pub(crate) fn parse_id<T>(raw: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdentifierError>,
{
    raw.parse::<T>().map_err(|error| match error {
        IdentifierError::Empty { .. } => missing_field_error(field),
        IdentifierError::Invalid { .. } => field_error_with_value(
            field,
            ValidationCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            raw,
        ),
    })
}

/// Absent or blank input is `None`.
pub(crate) fn parse_optional_id<T>(raw: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr<Err = IdentifierError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(value, field).map(Some),
    }
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    field_error_with_value(
                        field,
                        ValidationCode::InvalidTimestamp,
                        format!("{} must be an RFC 3339 timestamp", field.as_str()),
                        raw,
                    )
                })
        })
        .transpose()
}

pub(crate) fn text_error(error: TextValidationError) -> Error {
    let field = FieldName::new(error.field());
    let code = match error {
        TextValidationError::Empty { .. } => ValidationCode::Empty,
        TextValidationError::TooLong { .. } => ValidationCode::TooLong,
    };
    field_error(field, code, error.to_string())
}

pub(crate) fn status_error(error: ParseTaskStatusError) -> Error {
    field_error_with_value(
        FieldName::new("status"),
        ValidationCode::InvalidStatus,
        error.to_string(),
        &error.0,
    )
}

pub(crate) fn credential_error(error: CredentialValidationError) -> Error {
    let message = error.to_string();
    match error {
        CredentialValidationError::Email(_) => {
            field_error(FieldName::new("email"), ValidationCode::InvalidEmail, message)
        }
        CredentialValidationError::DisplayName(UserValidationError::DisplayNameTooLong {
            ..
        }) => field_error(FieldName::new("name"), ValidationCode::TooLong, message),
        CredentialValidationError::DisplayName(_) => field_error(
            FieldName::new("name"),
            ValidationCode::InvalidDisplayName,
            message,
        ),
        CredentialValidationError::EmptyPassword => {
            field_error(FieldName::new("password"), ValidationCode::Empty, message)
        }
        CredentialValidationError::PasswordLength { .. } => field_error(
            FieldName::new("password"),
            ValidationCode::InvalidPassword,
            message,
        ),
    }
}

pub(crate) fn attachment_error(error: AttachmentValidationError) -> Error {
    let message = error.to_string();
    let (field, code) = match error {
        AttachmentValidationError::EmptyFilename => ("filename", ValidationCode::Empty),
        AttachmentValidationError::FilenameTooLong { .. } => ("filename", ValidationCode::TooLong),
        AttachmentValidationError::EmptyContentType => ("contentType", ValidationCode::Empty),
        AttachmentValidationError::InvalidEncoding => ("fileData", ValidationCode::InvalidEncoding),
        AttachmentValidationError::TooLarge { .. } => ("fileData", ValidationCode::TooLarge),
    };
    field_error(FieldName::new(field), code, message)
}
