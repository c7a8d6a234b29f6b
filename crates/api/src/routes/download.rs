//! Download route.
//!
//! Exchanges an access code for a short-lived presigned URL.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use super::preflight;
use crate::{
    AppState,
    error::ApiError,
    middleware::{DOWNLOAD_METHODS, with_cors_headers},
};

/// Message returned with a download URL.
pub const DOWNLOAD_SUCCESS: &str = "Download URL generated successfully";

/// Creates the download routes.
pub fn routes() -> Router<AppState> {
    let router = Router::new().route("/download", get(download).options(preflight));
    with_cors_headers(router, DOWNLOAD_METHODS)
}

/// Query parameters for a download.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Code mailed to the recipient.
    pub access_code: Option<String>,
}

/// Response carrying a download URL.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    /// Outcome message.
    pub message: &'static str,
    /// Presigned URL for the stored file.
    pub download_url: String,
    /// Original file name.
    pub file_name: String,
    /// When the URL stops working (RFC 3339).
    pub expires_at: String,
}

/// Download handler.
async fn download(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid_request(e.body_text()))?;

    let link = state.share.download(query.access_code.as_deref()).await?;

    Ok(Json(DownloadResponse {
        message: DOWNLOAD_SUCCESS,
        download_url: link.url,
        file_name: link.file_name,
        expires_at: link.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}
