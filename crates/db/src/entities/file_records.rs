//! `SeaORM` Entity for file_records table.
//!
//! The table name can be overridden at runtime; see
//! [`FileRecordRepository`](crate::FileRecordRepository).

use fileshare_core::share::FileRecord;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "file_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub access_code: String,
    pub file_name: String,
    pub storage_key: String,
    pub recipient_email: String,
    pub expiration_date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FileRecord {
    fn from(model: Model) -> Self {
        Self {
            access_code: model.access_code,
            file_name: model.file_name,
            storage_key: model.storage_key,
            recipient_email: model.recipient_email,
            expiration_date: model.expiration_date.to_utc(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<&FileRecord> for Model {
    fn from(record: &FileRecord) -> Self {
        Self {
            access_code: record.access_code.clone(),
            file_name: record.file_name.clone(),
            storage_key: record.storage_key.clone(),
            recipient_email: record.recipient_email.clone(),
            expiration_date: record.expiration_date.fixed_offset(),
            created_at: record.created_at.fixed_offset(),
        }
    }
}
