//! Validation utilities for FarmConnect
//!
//! Checks here are advisory: they gate wizard navigation and upload
//! handling, not the stored data.

use once_cell::sync::Lazy;
use regex::Regex;

/// Largest accepted document image (5 MB)
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Image types accepted for Aadhaar uploads
pub const ALLOWED_DOCUMENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Validate that an email looks like `something@domain.tld`
pub fn validate_email_shape(email: &str) -> Result<(), &'static str> {
    if EMAIL_SHAPE.is_match(email) {
        Ok(())
    } else {
        Err("Please enter a valid email address")
    }
}

/// Validate an uploaded document's type and size
pub fn validate_document_upload(content_type: &str, size_bytes: u64) -> Result<(), &'static str> {
    if !ALLOWED_DOCUMENT_TYPES.contains(&content_type) {
        return Err("Invalid file type. Please upload JPEG, PNG, or WebP images.");
    }
    if size_bytes > MAX_DOCUMENT_BYTES {
        return Err("File size must be less than 5MB.");
    }
    Ok(())
}

/// Push `message` when `value` is blank
pub fn require_text(value: &str, message: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
}

/// Push `message` when the list is empty
pub fn require_selection<T>(values: &[T], message: &str, errors: &mut Vec<String>) {
    if values.is_empty() {
        errors.push(message.to_string());
    }
}

/// Push the email message when a non-empty email is malformed
pub fn check_optional_email(email: &str, errors: &mut Vec<String>) {
    if !email.is_empty() {
        if let Err(message) = validate_email_shape(email) {
            errors.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email_shape("ram@example.com").is_ok());
        assert!(validate_email_shape("user.name@domain.co.in").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email_shape("invalid").is_err());
        assert!(validate_email_shape("no@domain").is_err());
        assert!(validate_email_shape("@.").is_err());
    }

    #[test]
    fn test_document_upload_types() {
        assert!(validate_document_upload("image/jpeg", 1024).is_ok());
        assert!(validate_document_upload("image/webp", 1024).is_ok());
        assert!(validate_document_upload("application/pdf", 1024).is_err());
        assert!(validate_document_upload("image/gif", 1024).is_err());
    }

    #[test]
    fn test_document_upload_size() {
        assert!(validate_document_upload("image/png", MAX_DOCUMENT_BYTES).is_ok());
        assert_eq!(
            validate_document_upload("image/png", MAX_DOCUMENT_BYTES + 1),
            Err("File size must be less than 5MB.")
        );
    }

    #[test]
    fn test_optional_email() {
        let mut errors = Vec::new();
        check_optional_email("", &mut errors);
        assert!(errors.is_empty());

        check_optional_email("broken", &mut errors);
        assert_eq!(errors, vec!["Please enter a valid email address".to_string()]);
    }

    #[test]
    fn test_require_text_ignores_whitespace() {
        let mut errors = Vec::new();
        require_text("   ", "Name is required", &mut errors);
        require_text("Ram", "Name is required", &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
