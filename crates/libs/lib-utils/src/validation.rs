//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a metadata URI and return it trimmed.
///
/// Only emptiness is checked. The document behind the URI is never fetched or parsed.
pub fn validate_metadata_uri(uri: &str) -> Result<&str, String> {
    validate_not_empty(uri, "Metadata URI")?;
    Ok(uri.trim())
}

/// Validate that a URL uses http(s).
pub fn validate_http_url(url: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(url, field_name)?;
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("{} must be an http(s) URL", field_name))
    }
}
