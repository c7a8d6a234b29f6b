//! Share service implementation.
//!
//! Upload runs three side-effecting steps in order: store the blob, write
//! the record, notify the recipient. A failure stops the sequence and leaves
//! earlier effects in place (see [`LeftBehind`]). Download is read-only:
//! validate, fetch, check expiry, presign.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use super::error::{NotifyError, RecordStoreError, ShareError};
use super::notify::access_code_notification;
use super::types::{
    DownloadLink, FileRecord, LeftBehind, Notification, ShareSettings, UploadInput, UploadReceipt,
    ValidatedUpload, generate_access_code,
};
use super::validation::{validate_access_code, validate_upload};
use crate::storage::{PresignedUrl, StorageError, StorageService};

/// Object storage holding uploaded bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Issue a temporary read URL for `key`, valid for `ttl`.
    async fn presign_read(&self, key: &str, ttl: Duration) -> Result<PresignedUrl, StorageError>;
}

/// Key-value store of file records keyed by access code.
///
/// This trait is implemented by the db crate.
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Find a record by access code.
    async fn get(&self, access_code: &str) -> Result<Option<FileRecord>, RecordStoreError>;

    /// Insert a record.
    async fn put(&self, record: &FileRecord) -> Result<(), RecordStoreError>;
}

/// One-way message delivery to a recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Share service handling uploads and downloads.
///
/// Holds the process-wide backend handles; cheap to share behind an `Arc`.
pub struct ShareService {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn FileRecordStore>,
    notifier: Arc<dyn Notifier>,
    settings: ShareSettings,
}

impl ShareService {
    /// Create a new share service.
    #[must_use]
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn FileRecordStore>,
        notifier: Arc<dyn Notifier>,
        settings: ShareSettings,
    ) -> Self {
        Self {
            blobs,
            records,
            notifier,
            settings,
        }
    }

    /// Settings in effect.
    #[must_use]
    pub fn settings(&self) -> &ShareSettings {
        &self.settings
    }

    /// Accept a file, record it and mail its access code.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Input is missing or malformed (no side effects)
    /// - Blob write fails (no side effects)
    /// - Metadata write fails (blob orphaned)
    /// - Notification fails (record exists, code undelivered)
    pub async fn upload(&self, input: &UploadInput) -> Result<UploadReceipt, ShareError> {
        let upload = validate_upload(input, self.settings.max_file_size)?;

        let access_code = generate_access_code();
        let storage_key = StorageService::generate_storage_key(
            &self.settings.key_prefix,
            &access_code,
            &upload.file_name,
        );

        let result = self
            .run_upload_steps(access_code.clone(), storage_key, upload)
            .await;

        if let Err(err) = &result {
            if let Some(step) = err.failed_step() {
                let left_behind = err.left_behind();
                if left_behind == LeftBehind::Nothing {
                    warn!(%access_code, %step, error = %err, "Upload stopped");
                } else {
                    warn!(
                        %access_code,
                        %step,
                        %left_behind,
                        error = %err,
                        "Upload stopped after partial writes; not rolled back"
                    );
                }
            }
        }

        result
    }

    async fn run_upload_steps(
        &self,
        access_code: String,
        storage_key: String,
        upload: ValidatedUpload,
    ) -> Result<UploadReceipt, ShareError> {
        let size = upload.bytes.len();
        self.blobs
            .put(&storage_key, upload.bytes)
            .await
            .map_err(ShareError::BlobWrite)?;

        let now = Utc::now();
        let record = FileRecord {
            access_code,
            file_name: upload.file_name,
            storage_key,
            recipient_email: upload.recipient_email,
            expiration_date: now + self.settings.code_ttl,
            created_at: now,
        };

        self.records
            .put(&record)
            .await
            .map_err(ShareError::MetadataWrite)?;

        let notification = access_code_notification(&record, self.settings.code_ttl_days());
        self.notifier
            .publish(&notification)
            .await
            .map_err(ShareError::Notification)?;

        info!(
            access_code = %record.access_code,
            storage_key = %record.storage_key,
            size,
            expires_at = %record.expiration_date,
            "File shared"
        );

        Ok(UploadReceipt {
            access_code: record.access_code,
            expiration_date: record.expiration_date,
        })
    }

    /// Exchange an access code for a temporary download URL.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Access code is missing
    /// - Metadata lookup fails
    /// - No record exists for the code
    /// - The code has expired
    /// - The blob store cannot presign a URL
    pub async fn download(&self, access_code: Option<&str>) -> Result<DownloadLink, ShareError> {
        let access_code = validate_access_code(access_code)?;

        let record = self
            .records
            .get(access_code)
            .await
            .map_err(ShareError::Lookup)?
            .ok_or_else(|| ShareError::NotFound(access_code.to_string()))?;

        if record.is_expired_at(Utc::now()) {
            return Err(ShareError::Expired {
                access_code: record.access_code,
                expired_at: record.expiration_date,
            });
        }

        let presigned = self
            .blobs
            .presign_read(&record.storage_key, self.settings.download_url_ttl)
            .await
            .map_err(ShareError::Presign)?;

        info!(%access_code, url_expires_at = %presigned.expires_at, "Download URL issued");

        Ok(DownloadLink {
            url: presigned.url,
            expires_at: presigned.expires_at,
            file_name: record.file_name,
        })
    }
}
