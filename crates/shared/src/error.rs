//! Application-wide error types.
//!
//! `AppError` is the client-facing taxonomy: every failure a request can end
//! in maps to exactly one variant, and every variant maps to one HTTP status.
//! The inner string is the message returned to the caller.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown access code.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Access code past its validity window.
    #[error("Expired: {0}")]
    Expired(String),

    /// Blob or metadata backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Notification publish failure.
    #[error("Notification error: {0}")]
    Notification(String),

    /// Metadata read failure.
    #[error("Lookup error: {0}")]
    Lookup(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Expired(_) => 403,
            Self::NotFound(_) => 404,
            Self::Storage(_) | Self::Notification(_) | Self::Lookup(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Expired(_) => "EXPIRED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Notification(_) => "NOTIFICATION_ERROR",
            Self::Lookup(_) => "LOOKUP_ERROR",
        }
    }

    /// Returns the message shown to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Expired(msg)
            | Self::Storage(msg)
            | Self::Notification(msg)
            | Self::Lookup(msg) => msg,
        }
    }

    /// Whether the failure is the caller's fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::Expired(String::new()), 403, "EXPIRED")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Storage(String::new()), 500, "STORAGE_ERROR")]
    #[case(AppError::Notification(String::new()), 500, "NOTIFICATION_ERROR")]
    #[case(AppError::Lookup(String::new()), 500, "LOOKUP_ERROR")]
    fn test_error_status_and_code(
        #[case] err: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_client_error(), status < 500);
    }

    #[test]
    fn test_error_message_is_inner_text() {
        assert_eq!(
            AppError::Expired("Access code has expired".into()).message(),
            "Access code has expired"
        );
        assert_eq!(
            AppError::Lookup("Error retrieving file metadata".into()).message(),
            "Error retrieving file metadata"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(AppError::NotFound("msg".into()).to_string(), "Not found: msg");
        assert_eq!(AppError::Expired("msg".into()).to_string(), "Expired: msg");
        assert_eq!(
            AppError::Storage("msg".into()).to_string(),
            "Storage error: msg"
        );
        assert_eq!(
            AppError::Notification("msg".into()).to_string(),
            "Notification error: msg"
        );
        assert_eq!(AppError::Lookup("msg".into()).to_string(), "Lookup error: msg");
    }
}
