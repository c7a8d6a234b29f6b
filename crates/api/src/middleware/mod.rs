//! HTTP middleware.

pub mod cors;

pub use cors::{DOWNLOAD_METHODS, UPLOAD_METHODS, with_cors_headers};
