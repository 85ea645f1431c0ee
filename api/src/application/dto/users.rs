use uuid::Uuid;

use crate::application::dto::pets::PetDto;
use crate::application::dto::posts::PostDto;

#[derive(Debug, Clone)]
pub struct UserBaseDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub icon_image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserProfileDto {
    pub user: UserBaseDto,
    pub posts: Vec<PostDto>,
    pub pets: Vec<PetDto>,
    pub follows_count: i64,
    pub follower_count: i64,
}
