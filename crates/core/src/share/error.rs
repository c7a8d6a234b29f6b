//! Share operation errors.

use chrono::{DateTime, Utc};
use fileshare_shared::{AppError, EmailError};
use thiserror::Error;

use super::types::{LeftBehind, UploadStep};
use crate::storage::StorageError;

/// Metadata store failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RecordStoreError(pub String);

impl RecordStoreError {
    /// Create a record store error.
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Notifier failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);

impl From<EmailError> for NotifyError {
    fn from(err: EmailError) -> Self {
        Self(err.to_string())
    }
}

/// Upload and download pipeline errors.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Request input rejected before any side effect.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No record for the access code.
    #[error("no file record for access code {0}")]
    NotFound(String),

    /// Record found but past its expiration date.
    #[error("access code {access_code} expired at {expired_at}")]
    Expired {
        /// Expired access code.
        access_code: String,
        /// Recorded expiration date.
        expired_at: DateTime<Utc>,
    },

    /// Blob store rejected the file bytes.
    #[error("blob write failed: {0}")]
    BlobWrite(#[source] StorageError),

    /// Metadata store rejected the record.
    #[error("metadata write failed: {0}")]
    MetadataWrite(#[source] RecordStoreError),

    /// Notifier failed to publish the access code.
    #[error("notification failed: {0}")]
    Notification(#[source] NotifyError),

    /// Metadata store failed on read.
    #[error("metadata lookup failed: {0}")]
    Lookup(#[source] RecordStoreError),

    /// Blob store could not presign a download URL.
    #[error("download URL generation failed: {0}")]
    Presign(#[source] StorageError),
}

impl ShareError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Upload step that failed, for errors raised by a side-effecting step.
    #[must_use]
    pub const fn failed_step(&self) -> Option<UploadStep> {
        match self {
            Self::BlobWrite(_) => Some(UploadStep::StoreBlob),
            Self::MetadataWrite(_) => Some(UploadStep::WriteMetadata),
            Self::Notification(_) => Some(UploadStep::Notify),
            _ => None,
        }
    }

    /// Effects left in place by this failure.
    #[must_use]
    pub const fn left_behind(&self) -> LeftBehind {
        match self.failed_step() {
            Some(step) => LeftBehind::after_failed(step),
            None => LeftBehind::Nothing,
        }
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::Validation(msg) => Self::Validation(msg),
            ShareError::NotFound(_) => Self::NotFound("File not found".to_string()),
            ShareError::Expired { .. } => Self::Expired("Access code has expired".to_string()),
            ShareError::BlobWrite(_) => {
                Self::Storage("Error uploading file to storage".to_string())
            }
            ShareError::MetadataWrite(_) => {
                Self::Storage("Error saving file metadata".to_string())
            }
            ShareError::Notification(_) => Self::Notification("Error sending email".to_string()),
            ShareError::Lookup(_) => Self::Lookup("Error retrieving file metadata".to_string()),
            ShareError::Presign(_) => Self::Storage("Error generating download URL".to_string()),
        }
    }
}
