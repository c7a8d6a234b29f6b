//! Core share logic for Fileshare.
//!
//! This crate contains the upload and download pipelines with ZERO web or
//! database dependencies. Backends are reached through the traits in
//! [`share`]; the OpenDAL blob store lives in [`storage`].
//!
//! # Modules
//!
//! - `share` - File records, validation, upload/download pipelines
//! - `storage` - Vendor-agnostic object storage

pub mod share;
pub mod storage;
