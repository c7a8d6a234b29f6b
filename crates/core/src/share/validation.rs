//! Request validation for the share pipelines.
//!
//! Every check here runs before any backend call.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use validator::ValidateEmail;

use super::error::ShareError;
use super::types::{UploadInput, ValidatedUpload};

/// Message for an upload missing one of its fields.
pub const MISSING_UPLOAD_FIELDS: &str =
    "Missing required parameters: file_content, file_name, or recipient_email";

/// Message for a download without an access code.
pub const MISSING_ACCESS_CODE: &str = "Access code is required";

/// Returns the field when present and not blank.
fn required(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.trim().is_empty())
}

/// Validation error for a payload over `max_file_size`.
///
/// `size` is the decoded size when known; oversized request bodies are
/// refused before decoding.
#[must_use]
pub fn file_too_large(size: Option<u64>, max_file_size: u64) -> ShareError {
    match size {
        Some(size) => ShareError::validation(format!(
            "File size {size} bytes exceeds maximum allowed {max_file_size} bytes"
        )),
        None => ShareError::validation(format!(
            "File size exceeds maximum allowed {max_file_size} bytes"
        )),
    }
}

/// Decode base64 file content.
///
/// Line breaks and other ASCII whitespace are ignored, so wrapped output
/// of MIME encoders decodes as well.
///
/// # Errors
///
/// Returns a validation error if the text is not standard base64.
pub fn decode_file_content(encoded: &str) -> Result<Vec<u8>, ShareError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|_| ShareError::validation("file_content is not valid base64"))
}

/// Validate an upload request.
///
/// # Errors
///
/// Returns a validation error if:
/// - any field is missing or blank
/// - the recipient address is malformed
/// - the payload is not base64
/// - the decoded payload exceeds `max_file_size`
pub fn validate_upload(
    input: &UploadInput,
    max_file_size: u64,
) -> Result<ValidatedUpload, ShareError> {
    let (Some(content), Some(file_name), Some(recipient_email)) = (
        required(input.file_content.as_deref()),
        required(input.file_name.as_deref()),
        required(input.recipient_email.as_deref()),
    ) else {
        return Err(ShareError::validation(MISSING_UPLOAD_FIELDS));
    };

    let recipient_email = recipient_email.trim();
    if !recipient_email.validate_email() {
        return Err(ShareError::validation("Invalid recipient email address"));
    }

    let bytes = decode_file_content(content)?;
    let size = bytes.len() as u64;
    if size > max_file_size {
        return Err(file_too_large(Some(size), max_file_size));
    }

    Ok(ValidatedUpload {
        bytes,
        file_name: file_name.trim().to_string(),
        recipient_email: recipient_email.to_string(),
    })
}

/// Validate the access code of a download request.
///
/// # Errors
///
/// Returns a validation error if the code is missing or blank.
pub fn validate_access_code(access_code: Option<&str>) -> Result<&str, ShareError> {
    required(access_code)
        .map(str::trim)
        .ok_or_else(|| ShareError::validation(MISSING_ACCESS_CODE))
}
