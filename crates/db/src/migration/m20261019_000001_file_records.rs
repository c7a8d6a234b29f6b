//! File records migration.
//!
//! Creates the table mapping access codes to stored blobs.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(FILE_RECORDS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS file_records;")
            .await?;
        Ok(())
    }
}

const FILE_RECORDS_SQL: &str = r"
-- One row per shared file, keyed by the code mailed to the recipient
CREATE TABLE file_records (
    access_code VARCHAR(64) PRIMARY KEY,
    file_name TEXT NOT NULL,
    storage_key TEXT NOT NULL,
    recipient_email VARCHAR(320) NOT NULL,
    expiration_date TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expiration_after_creation CHECK (expiration_date > created_at)
);

-- Index for cleanup of expired records
CREATE INDEX idx_file_records_expiration ON file_records(expiration_date);
";
