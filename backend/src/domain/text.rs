//! Bounded, trimmed text fields shared by projects, tasks and comments.

use std::fmt;

/// Invalid free-text input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextValidationError {
    /// Nothing left after trimming.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// Longer than the field allows.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl TextValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

fn bounded(raw: &str, field: &'static str, max: usize) -> Result<String, TextValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(TextValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Longest accepted value, in characters.
            pub const MAX: usize = $max;

            /// Trim and validate.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, TextValidationError> {
                bounded(raw.as_ref(), $field, Self::MAX).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

bounded_text! {
    /// Project title.
    ProjectTitle, "title", 200
}

bounded_text! {
    /// Task title. Interpolated into notification messages.
    TaskTitle, "title", 200
}

bounded_text! {
    /// Comment body.
    CommentContent, "content", 10_000
}
