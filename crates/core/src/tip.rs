//! Tip submissions and photo attachments.

use serde::Serialize;

use crate::types::PersonId;

/// Default maximum attachment size (5 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Image MIME types accepted by the default [`AttachmentPolicy`].
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a tip is rejected before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TipValidationError {
    #[error("Observation and location are both blank")]
    Blank,

    #[error("Target person id is blank")]
    BlankPersonId,

    #[error("Attachment {file_name} is {size} bytes (limit {limit})")]
    AttachmentTooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },

    #[error("Attachment {file_name} has unsupported type {content_type}")]
    UnsupportedType {
        file_name: String,
        content_type: String,
    },
}

// ---------------------------------------------------------------------------
// PhotoAttachment
// ---------------------------------------------------------------------------

/// An image attached to a tip.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl PhotoAttachment {
    /// Create an attachment; the file name is sanitized for upload.
    pub fn new(file_name: &str, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: sanitize_file_name(file_name),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// AttachmentPolicy
// ---------------------------------------------------------------------------

/// Optional size/type check run before a tip is sent.
#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl AttachmentPolicy {
    pub fn check(&self, photo: &PhotoAttachment) -> Result<(), TipValidationError> {
        if photo.size() > self.max_bytes {
            return Err(TipValidationError::AttachmentTooLarge {
                file_name: photo.file_name.clone(),
                size: photo.size(),
                limit: self.max_bytes,
            });
        }
        if !self.allowed_types.iter().any(|t| t == &photo.content_type) {
            return Err(TipValidationError::UnsupportedType {
                file_name: photo.file_name.clone(),
                content_type: photo.content_type.clone(),
            });
        }
        Ok(())
    }

    pub fn check_all(&self, photos: &[PhotoAttachment]) -> Result<(), TipValidationError> {
        photos.iter().try_for_each(|p| self.check(p))
    }
}

// ---------------------------------------------------------------------------
// TipSubmission
// ---------------------------------------------------------------------------

/// A validated tip about one person, built fresh per submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipSubmission {
    pub person_id: PersonId,
    /// Registry occurrence the tip refers to, when known.
    pub occurrence_id: Option<i64>,
    pub observation: String,
    pub location: String,
    /// Contact phone as entered (formatted).
    pub phone: Option<String>,
    pub photos: Vec<PhotoAttachment>,
}

impl TipSubmission {
    /// Validate and build a submission.
    ///
    /// Observation and location are trimmed; at least one must be non-empty.
    /// A blank phone becomes `None`.
    pub fn new(
        person_id: PersonId,
        occurrence_id: Option<i64>,
        observation: &str,
        location: &str,
        phone: Option<&str>,
        photos: Vec<PhotoAttachment>,
    ) -> Result<Self, TipValidationError> {
        if person_id.is_blank() {
            return Err(TipValidationError::BlankPersonId);
        }
        let observation = observation.trim();
        let location = location.trim();
        if observation.is_empty() && location.is_empty() {
            return Err(TipValidationError::Blank);
        }

        Ok(Self {
            person_id,
            occurrence_id,
            observation: observation.to_string(),
            location: location.to_string(),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            photos,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
