//! Shared errors, configuration, and email delivery for Fileshare.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management
//! - SMTP email delivery

pub mod config;
pub mod email;
pub mod error;

pub use config::{AppConfig, EmailConfig, StorageProvider, StorageSettings};
pub use email::{EmailError, EmailService};
pub use error::AppError;
