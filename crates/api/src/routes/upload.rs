//! Upload route.
//!
//! Accepts `{file_content, file_name, recipient_email}` with the file bytes
//! base64-encoded, stores the file and mails the recipient an access code.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    routing::post,
};
use chrono::SecondsFormat;
use fileshare_core::share::{UploadInput, validation::file_too_large};
use serde::Serialize;
use tracing::debug;

use super::preflight;
use crate::{
    AppState,
    error::ApiError,
    middleware::{UPLOAD_METHODS, with_cors_headers},
};

/// Message returned after a successful upload.
pub const UPLOAD_SUCCESS: &str = "File uploaded and email sent successfully";

/// Creates the upload routes.
pub fn routes(max_body_bytes: usize) -> Router<AppState> {
    let router = Router::new()
        .route("/upload", post(upload).options(preflight))
        .layer(DefaultBodyLimit::max(max_body_bytes));
    with_cors_headers(router, UPLOAD_METHODS)
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Outcome message.
    pub message: &'static str,
    /// Code the recipient uses to download the file.
    pub access_code: String,
    /// When the access code stops working (RFC 3339).
    pub expires_at: String,
}

/// Upload handler.
///
/// The body is parsed as JSON whatever its content type.
async fn upload(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            debug!(limit = state.max_body_bytes, "Upload body over limit");
            ApiError::from(file_too_large(None, state.share.settings().max_file_size))
        } else {
            ApiError::invalid_request(e.body_text())
        }
    })?;
    let input: UploadInput = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Upload body is not a JSON object");
        ApiError::invalid_request(e.to_string())
    })?;

    let receipt = state.share.upload(&input).await?;

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS,
        access_code: receipt.access_code,
        expires_at: receipt
            .expiration_date
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}
