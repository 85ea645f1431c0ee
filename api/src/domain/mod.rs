pub mod comments;
pub mod follows;
pub mod likes;
pub mod pets;
pub mod posts;
pub mod users;

/// Rejected input on a domain value (empty caption, unknown pet type, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Trims `raw` and enforces a non-empty value of at most `max` characters.
pub(crate) fn bounded_text(
    raw: &str,
    field: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::new(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}
