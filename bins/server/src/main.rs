//! Fileshare API Server
//!
//! Builds the storage, metadata and email clients once and serves the
//! upload and download endpoints.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fileshare_api::{AppState, create_router};
use fileshare_core::share::{ShareService, ShareSettings};
use fileshare_core::storage::{StorageConfig, StorageService};
use fileshare_db::{FileRecordRepository, connect_with};
use fileshare_shared::{AppConfig, EmailService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fileshare=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Blob storage
    let storage_config = StorageConfig::from_settings(&config.storage);
    let settings = ShareSettings::new(&config.share, &storage_config);
    let storage = StorageService::from_config(storage_config)
        .context("Failed to configure blob storage")?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        "Storage configured"
    );

    // Metadata store
    let db = connect_with(&config.database).await?;
    let records = FileRecordRepository::with_table(db, config.database.table.clone());
    info!(table = records.table(), "Connected to database");

    // Notification channel
    let email_service = EmailService::new(config.email.clone());
    info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = %config.email.smtp_port,
        "Email service configured"
    );

    let share = ShareService::new(
        Arc::new(storage),
        Arc::new(records),
        Arc::new(email_service),
        settings,
    );

    // Create router
    let app = create_router(AppState::new(Arc::new(share)));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
