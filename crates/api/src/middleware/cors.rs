//! Fixed CORS response headers.
//!
//! Every response from the share endpoints, including errors and preflight
//! replies, carries the same three headers. Preflight itself is answered by
//! the route's `OPTIONS` handler.

use axum::{
    Router,
    http::{HeaderValue, header},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::AppState;

/// Methods advertised by the upload endpoint.
pub const UPLOAD_METHODS: &str = "OPTIONS,POST,GET";

/// Methods advertised by the download endpoint.
pub const DOWNLOAD_METHODS: &str = "OPTIONS,GET";

/// Attach the CORS headers to every response of `router`.
pub fn with_cors_headers(router: Router<AppState>, methods: &'static str) -> Router<AppState> {
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(methods),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
