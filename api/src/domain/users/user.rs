use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::{ValidationError, bounded_text};

pub const NAME_MAX_CHARS: usize = 50;
pub const BIO_MAX_CHARS: usize = 300;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub icon_image_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::new("email is required"));
    }
    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::new("email is malformed"));
    }
    Ok(email)
}

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    bounded_text(raw, "name", NAME_MAX_CHARS)
}

/// Bios may be empty; only the length is bounded.
pub fn validate_bio(raw: &str) -> Result<String, ValidationError> {
    let bio = raw.trim();
    if bio.chars().count() > BIO_MAX_CHARS {
        return Err(ValidationError::new(format!(
            "bio must be at most {BIO_MAX_CHARS} characters"
        )));
    }
    Ok(bio.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(
            normalize_email("  Jane.Smith@Example.COM ").unwrap(),
            "jane.smith@example.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(normalize_email("").is_err());
        assert!(normalize_email("no-at-sign.example.com").is_err());
        assert!(normalize_email("two@@example.com").is_err());
        assert!(normalize_email("missing@tld").is_err());
    }

    #[test]
    fn name_must_be_present_and_bounded() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(NAME_MAX_CHARS + 1)).is_err());
        assert_eq!(validate_name(" Alex ").unwrap(), "Alex");
    }

    #[test]
    fn empty_bio_is_allowed() {
        assert_eq!(validate_bio("").unwrap(), "");
        assert!(validate_bio(&"b".repeat(BIO_MAX_CHARS + 1)).is_err());
    }
}
