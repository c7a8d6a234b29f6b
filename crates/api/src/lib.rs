//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Upload, download and health routes
//! - Fixed CORS response headers
//! - Error rendering for the share pipeline

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use fileshare_core::share::ShareService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Headroom over the encoded payload for the JSON envelope.
const BODY_OVERHEAD: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload and download pipelines.
    pub share: Arc<ShareService>,
    /// Largest request body accepted on upload.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Creates state sized for the service's maximum file size.
    #[must_use]
    pub fn new(share: Arc<ShareService>) -> Self {
        let max_file_size = usize::try_from(share.settings().max_file_size).unwrap_or(usize::MAX);
        // base64 expands every 3 bytes to 4
        let max_body_bytes = max_file_size
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(BODY_OVERHEAD);
        Self {
            share,
            max_body_bytes,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
