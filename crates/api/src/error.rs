//! Error rendering at the handler boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fileshare_core::share::ShareError;
use fileshare_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Message returned when the request body or query cannot be parsed.
pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// Handler error rendered as `{"message": ...}` with the mapped status.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    detail: Option<String>,
}

impl ApiError {
    /// Creates a validation error for a malformed request.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self {
            error: AppError::Validation(INVALID_REQUEST_FORMAT.to_string()),
            detail: Some(detail.into()),
        }
    }

    /// Client-facing error.
    #[must_use]
    pub const fn app_error(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            detail: None,
        }
    }
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        let detail = err.to_string();
        Self {
            error: err.into(),
            detail: Some(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.error.error_code();
        let detail = self.detail.as_deref().unwrap_or_default();

        if self.error.is_client_error() {
            warn!(%status, code, detail, message = self.error.message(), "Request rejected");
        } else {
            error!(%status, code, detail, message = self.error.message(), "Request failed");
        }

        (status, Json(json!({ "message": self.error.message() }))).into_response()
    }
}
