//! In-memory backends and helpers for route tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use axum::{http::header, response::Response};
use chrono::{Duration, Utc};
use fileshare_core::share::{
    BlobStore, FileRecord, FileRecordStore, Notification, Notifier, NotifyError,
    RecordStoreError, ShareService, ShareSettings,
};
use fileshare_core::storage::{PresignedUrl, StorageError};
use http_body_util::BodyExt;

use crate::AppState;

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_put: AtomicBool,
    pub fail_presign: AtomicBool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::operation("bucket unavailable"));
        }
        self.blobs.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign_read(
        &self,
        key: &str,
        ttl: StdDuration,
    ) -> Result<PresignedUrl, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StorageError::PresignNotSupported);
        }
        Ok(PresignedUrl {
            url: format!("memory://{key}"),
            expires_at: Utc::now() + Duration::from_std(ttl).unwrap(),
        })
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, FileRecord>>,
    pub fail_put: AtomicBool,
    pub fail_get: AtomicBool,
    pub get_calls: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn insert(&self, record: FileRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.access_code.clone(), record);
    }

    pub fn contains(&self, access_code: &str) -> bool {
        self.records.lock().unwrap().contains_key(access_code)
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl FileRecordStore for MemoryRecordStore {
    async fn get(&self, access_code: &str) -> Result<Option<FileRecord>, RecordStoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(RecordStoreError::new("connection reset"));
        }
        Ok(self.records.lock().unwrap().get(access_code).cloned())
    }

    async fn put(&self, record: &FileRecord) -> Result<(), RecordStoreError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(RecordStoreError::new("table unavailable"));
        }
        self.insert(record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    pub fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError("relay refused".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct TestBackends {
    pub blobs: Arc<MemoryBlobStore>,
    pub records: Arc<MemoryRecordStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestBackends {
    pub fn state(&self) -> AppState {
        self.state_with(ShareSettings::default())
    }

    pub fn state_with_max_file_size(&self, max_file_size: u64) -> AppState {
        self.state_with(ShareSettings {
            max_file_size,
            ..ShareSettings::default()
        })
    }

    fn state_with(&self, settings: ShareSettings) -> AppState {
        let service = ShareService::new(
            self.blobs.clone(),
            self.records.clone(),
            self.notifier.clone(),
            settings,
        );
        AppState::new(Arc::new(service))
    }
}

pub fn record_expiring_in(access_code: &str, remaining: Duration) -> FileRecord {
    let expiration_date = Utc::now() + remaining;
    FileRecord {
        access_code: access_code.to_string(),
        file_name: "notes.txt".to_string(),
        storage_key: format!("uploads/{access_code}/notes.txt"),
        recipient_email: "friend@example.com".to_string(),
        expiration_date,
        created_at: expiration_date - Duration::days(7),
    }
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_cors(response: &Response, methods: &str) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], methods);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}
