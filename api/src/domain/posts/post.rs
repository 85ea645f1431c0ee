use uuid::Uuid;

use crate::domain::users::user::User;
use crate::domain::{ValidationError, bounded_text};

pub const CAPTION_MAX_CHARS: usize = 2200;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub caption: String,
    pub image_key: String,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Post {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A post joined with its author and engagement counters, as listed in feeds.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
    pub likes_count: i64,
    pub comments_count: i64,
}

pub fn validate_caption(raw: &str) -> Result<String, ValidationError> {
    bounded_text(raw, "caption", CAPTION_MAX_CHARS)
}
