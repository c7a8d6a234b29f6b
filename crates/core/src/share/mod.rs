//! File sharing by access code.
//!
//! This module provides business logic for:
//! - Upload validation and payload decoding
//! - The upload sequence (blob, record, notification)
//! - Access code lookup, expiry checks, and download URLs

mod error;
mod notify;
mod service;
mod types;
pub mod validation;


pub use error::{NotifyError, RecordStoreError, ShareError};
pub use notify::{ACCESS_CODE_SUBJECT, access_code_notification};
pub use service::{BlobStore, FileRecordStore, Notifier, ShareService};
pub use types::{
    DownloadLink, FileRecord, LeftBehind, Notification, ShareSettings, UploadInput, UploadReceipt,
    UploadStep, ValidatedUpload, generate_access_code,
};
