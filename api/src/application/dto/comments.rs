use uuid::Uuid;

use crate::application::dto::users::UserBaseDto;

#[derive(Debug, Clone)]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: UserBaseDto,
}
