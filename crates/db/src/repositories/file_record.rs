//! File record repository for database operations.
//!
//! Queries are built with `sea_query` against a configurable table name so
//! the same schema can be deployed under a different name per environment.

use async_trait::async_trait;
use fileshare_core::share::{FileRecord, FileRecordStore, RecordStoreError};
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult};
use tracing::{debug, error};

use crate::entities::file_records::{self, Column};

/// Default table name, matching the bundled migration.
pub const DEFAULT_TABLE: &str = "file_records";

const COLUMNS: [Column; 6] = [
    Column::AccessCode,
    Column::FileName,
    Column::StorageKey,
    Column::RecipientEmail,
    Column::ExpirationDate,
    Column::CreatedAt,
];

/// File record repository keyed by access code.
#[derive(Debug, Clone)]
pub struct FileRecordRepository {
    db: DatabaseConnection,
    table: String,
}

impl FileRecordRepository {
    /// Creates a repository over the default table.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_table(db, DEFAULT_TABLE)
    }

    /// Creates a repository over `table`.
    #[must_use]
    pub fn with_table(db: DatabaseConnection, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    /// Table this repository reads and writes.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Finds a record by access code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<file_records::Model>, DbErr> {
        let stmt = Query::select()
            .columns(COLUMNS)
            .from(Alias::new(&self.table))
            .and_where(Expr::col(Column::AccessCode).eq(access_code))
            .to_owned();

        let backend = self.db.get_database_backend();
        file_records::Model::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
    }

    /// Inserts a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including when the
    /// access code already exists.
    pub async fn insert(&self, record: &FileRecord) -> Result<(), DbErr> {
        let stmt = Query::insert()
            .into_table(Alias::new(&self.table))
            .columns(COLUMNS)
            .values([
                record.access_code.as_str().into(),
                record.file_name.as_str().into(),
                record.storage_key.as_str().into(),
                record.recipient_email.as_str().into(),
                record.expiration_date.into(),
                record.created_at.into(),
            ])
            .map_err(|e| DbErr::Custom(e.to_string()))?
            .to_owned();

        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&stmt)).await?;
        Ok(())
    }
}

#[async_trait]
impl FileRecordStore for FileRecordRepository {
    async fn get(&self, access_code: &str) -> Result<Option<FileRecord>, RecordStoreError> {
        match self.find_by_access_code(access_code).await {
            Ok(model) => Ok(model.map(FileRecord::from)),
            Err(e) => {
                error!(table = %self.table, error = %e, "Failed to read file record");
                Err(RecordStoreError::new(e.to_string()))
            }
        }
    }

    async fn put(&self, record: &FileRecord) -> Result<(), RecordStoreError> {
        match self.insert(record).await {
            Ok(()) => {
                debug!(
                    table = %self.table,
                    access_code = %record.access_code,
                    "File record written"
                );
                Ok(())
            }
            Err(e) => {
                error!(table = %self.table, error = %e, "Failed to write file record");
                Err(RecordStoreError::new(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sample_record() -> FileRecord {
        let created = Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap();
        FileRecord {
            access_code: "c56a4180-65aa-42ec-a945-5fd21dec0538".to_string(),
            file_name: "notes.txt".to_string(),
            storage_key: "uploads/c56a4180-65aa-42ec-a945-5fd21dec0538/notes.txt".to_string(),
            recipient_email: "friend@example.com".to_string(),
            expiration_date: created + Duration::days(7),
            created_at: created,
        }
    }

    fn logged_sql(db: DatabaseConnection) -> String {
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        format!("{:?}", log[0])
    }

    #[tokio::test]
    async fn test_get_maps_row_to_record() {
        let record = sample_record();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![file_records::Model::from(&record)]])
            .into_connection();
        let repo = FileRecordRepository::new(db.clone());

        let found = repo.get(&record.access_code).await.unwrap();
        assert_eq!(found, Some(record));

        let sql = logged_sql(db);
        assert!(sql.contains("file_records"));
        assert!(sql.contains("access_code"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<file_records::Model>::new()])
            .into_connection();
        let repo = FileRecordRepository::new(db);

        assert_eq!(repo.get("unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_error_maps_to_record_store_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = FileRecordRepository::new(db);

        let err = repo.get("any").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_put_uses_configured_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = FileRecordRepository::with_table(db.clone(), "shared_files");
        assert_eq!(repo.table(), "shared_files");

        repo.put(&sample_record()).await.unwrap();

        let sql = logged_sql(db);
        assert!(sql.contains("INSERT INTO"));
        assert!(sql.contains("shared_files"));
        assert!(sql.contains("recipient_email"));
    }

    #[tokio::test]
    async fn test_put_error_maps_to_record_store_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("duplicate key".to_string())])
            .into_connection();
        let repo = FileRecordRepository::new(db);

        let err = repo.put(&sample_record()).await.unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }
}
