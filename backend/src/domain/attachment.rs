//! File attachments and the upload size limit.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use super::{AttachmentId, TaskId, UserId};

/// Largest accepted decoded payload: 10 MiB.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;
/// Longest accepted file name, in characters.
pub const FILENAME_MAX: usize = 255;

/// Reasons an upload is rejected before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentValidationError {
    #[error("filename must not be empty")]
    EmptyFilename,
    #[error("filename must be at most {max} characters")]
    FilenameTooLong { max: usize },
    #[error("content type must not be empty")]
    EmptyContentType,
    #[error("file data must be valid base64")]
    InvalidEncoding,
    #[error("file exceeds the {max} byte limit")]
    TooLarge { max: usize },
}

/// Decoded upload payload, guaranteed to be within [`MAX_ATTACHMENT_BYTES`].
#[derive(Clone, PartialEq, Eq)]
pub struct AttachmentPayload(Vec<u8>);

impl AttachmentPayload {
    /// Decode standard base64 and enforce the size limit.
    ///
    /// Oversized input is refused from its encoded length alone, before any
    /// decoding work is done.
    ///
    /// # Examples
    /// ```
    /// use taskhub::domain::AttachmentPayload;
    ///
    /// let payload = AttachmentPayload::from_base64("aGVsbG8=").unwrap();
    /// assert_eq!(payload.as_bytes(), b"hello");
    /// assert!(AttachmentPayload::from_base64("not base64!").is_err());
    /// ```
    pub fn from_base64(encoded: &str) -> Result<Self, AttachmentValidationError> {
        let encoded = encoded.trim();
        if base64::decoded_len_estimate(encoded.len()) > MAX_ATTACHMENT_BYTES + 3 {
            return Err(AttachmentValidationError::TooLarge {
                max: MAX_ATTACHMENT_BYTES,
            });
        }
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| AttachmentValidationError::InvalidEncoding)?;
        Self::from_bytes(bytes)
    }

    /// Accept already-decoded bytes, enforcing the size limit.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AttachmentValidationError> {
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentValidationError::TooLarge {
                max: MAX_ATTACHMENT_BYTES,
            });
        }
        Ok(Self(bytes))
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload re-encoded as standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AttachmentPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AttachmentPayload({} bytes)", self.0.len())
    }
}

/// Validated upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub task_id: TaskId,
    pub filename: String,
    pub content_type: String,
    pub payload: AttachmentPayload,
}

impl NewAttachment {
    /// Validate the metadata and decode the payload.
    pub fn try_new(
        task_id: TaskId,
        filename: &str,
        content_type: &str,
        encoded: &str,
    ) -> Result<Self, AttachmentValidationError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(AttachmentValidationError::EmptyFilename);
        }
        if filename.chars().count() > FILENAME_MAX {
            return Err(AttachmentValidationError::FilenameTooLong { max: FILENAME_MAX });
        }
        let content_type = content_type.trim();
        if content_type.is_empty() {
            return Err(AttachmentValidationError::EmptyContentType);
        }
        let payload = AttachmentPayload::from_base64(encoded)?;
        Ok(Self {
            task_id,
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            payload,
        })
    }
}

/// Stored attachment metadata. The payload is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub id: AttachmentId,
    pub task_id: TaskId,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_by: UserId,
    pub created_at: DateTime<Utc>,
}
