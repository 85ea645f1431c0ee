use uuid::Uuid;

use crate::application::dto::users::UserBaseDto;

#[derive(Debug, Clone)]
pub struct PostDto {
    pub id: Uuid,
    pub caption: String,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub author: UserBaseDto,
}
