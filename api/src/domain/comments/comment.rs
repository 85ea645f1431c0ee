use uuid::Uuid;

use crate::domain::users::user::User;
use crate::domain::{ValidationError, bounded_text};

pub const CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}

pub fn validate_content(raw: &str) -> Result<String, ValidationError> {
    bounded_text(raw, "content", CONTENT_MAX_CHARS)
}
