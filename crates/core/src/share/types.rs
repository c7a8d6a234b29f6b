//! Share types and data structures.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fileshare_shared::config::ShareConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::StorageConfig;

/// Metadata for one shared file, keyed by its access code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Access code, primary key.
    pub access_code: String,
    /// Original file name (display only).
    pub file_name: String,
    /// Locator of the bytes in the blob store.
    pub storage_key: String,
    /// Address the access code was sent to.
    pub recipient_email: String,
    /// Download is refused once this instant has passed.
    pub expiration_date: DateTime<Utc>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// True when `now` is strictly after the expiration date.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiration_date
    }
}

/// Generate a fresh access code (random UUID v4, hyphenated).
#[must_use]
pub fn generate_access_code() -> String {
    Uuid::new_v4().to_string()
}

/// Raw upload request fields as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadInput {
    /// Base64-encoded file bytes.
    #[serde(default)]
    pub file_content: Option<String>,
    /// Original file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Recipient of the access code.
    #[serde(default)]
    pub recipient_email: Option<String>,
}

/// Upload that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Decoded file bytes.
    pub bytes: Vec<u8>,
    /// Original file name.
    pub file_name: String,
    /// Recipient of the access code.
    pub recipient_email: String,
}

/// Result of a completed upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Generated access code.
    pub access_code: String,
    /// When the access code stops working.
    pub expiration_date: DateTime<Utc>,
}

/// Temporary retrieval link for a shared file.
#[derive(Debug, Clone)]
pub struct DownloadLink {
    /// Presigned URL.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
    /// Original file name.
    pub file_name: String,
}

/// Message handed to a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub message: String,
}

/// Side-effecting steps of an upload, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    /// Write file bytes to the blob store.
    StoreBlob,
    /// Write the file record to the metadata store.
    WriteMetadata,
    /// Publish the access code to the recipient.
    Notify,
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StoreBlob => "store_blob",
            Self::WriteMetadata => "write_metadata",
            Self::Notify => "notify",
        })
    }
}

/// Effects that persist after an upload stops at a failed step.
///
/// Nothing is rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftBehind {
    /// No side effect happened.
    Nothing,
    /// Blob written, no record points at it.
    OrphanedBlob,
    /// Blob and record written, recipient never got the code.
    UndeliveredCode,
}

impl LeftBehind {
    /// What persists when `step` fails.
    #[must_use]
    pub const fn after_failed(step: UploadStep) -> Self {
        match step {
            UploadStep::StoreBlob => Self::Nothing,
            UploadStep::WriteMetadata => Self::OrphanedBlob,
            UploadStep::Notify => Self::UndeliveredCode,
        }
    }
}

impl fmt::Display for LeftBehind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nothing => "nothing",
            Self::OrphanedBlob => "orphaned_blob",
            Self::UndeliveredCode => "undelivered_code",
        })
    }
}

/// Tunables of the share pipelines.
#[derive(Debug, Clone)]
pub struct ShareSettings {
    /// Prefix for storage keys.
    pub key_prefix: String,
    /// Validity window of an access code.
    pub code_ttl: chrono::Duration,
    /// Validity window of a download URL.
    pub download_url_ttl: Duration,
    /// Largest accepted decoded upload.
    pub max_file_size: u64,
}

impl ShareSettings {
    /// Combine share and storage configuration.
    #[must_use]
    pub fn new(share: &ShareConfig, storage: &StorageConfig) -> Self {
        Self {
            key_prefix: share.key_prefix.clone(),
            code_ttl: chrono::Duration::days(i64::from(share.code_ttl_days)),
            download_url_ttl: Duration::from_secs(storage.presign_download_ttl_secs),
            max_file_size: storage.max_file_size,
        }
    }

    /// Whole days an access code stays valid.
    #[must_use]
    pub fn code_ttl_days(&self) -> i64 {
        self.code_ttl.num_days()
    }
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            key_prefix: "uploads".to_string(),
            code_ttl: chrono::Duration::days(7),
            download_url_ttl: Duration::from_secs(StorageConfig::DEFAULT_DOWNLOAD_TTL),
            max_file_size: StorageConfig::DEFAULT_MAX_FILE_SIZE,
        }
    }
}
