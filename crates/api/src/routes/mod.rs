//! API route definitions.

use axum::{Router, http::StatusCode};

use crate::AppState;

pub mod download;
pub mod health;
pub mod upload;

/// Creates the API router with all routes.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(upload::routes(state.max_body_bytes))
        .merge(download::routes())
}

/// Preflight handler: 200 with an empty body.
async fn preflight() -> StatusCode {
    StatusCode::OK
}
