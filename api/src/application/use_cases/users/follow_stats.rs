use uuid::Uuid;

use crate::application::dto::users::UserBaseDto;
use crate::application::error::AppResult;
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::services::views;

/// Counts and lists for both directions of the follow graph.
pub struct FollowStats<'a, F, S>
where
    F: FollowRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub follows: &'a F,
    pub storage: &'a S,
}

impl<'a, F, S> FollowStats<'a, F, S>
where
    F: FollowRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn follows_count(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self.follows.count_follows(user_id).await?)
    }

    pub async fn follower_count(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self.follows.count_followers(user_id).await?)
    }

    pub async fn follows_users(&self, user_id: Uuid) -> AppResult<Vec<UserBaseDto>> {
        let rows = self.follows.list_follows(user_id).await?;
        Ok(views::users(self.storage, rows).await?)
    }

    pub async fn follower_users(&self, user_id: Uuid) -> AppResult<Vec<UserBaseDto>> {
        let rows = self.follows.list_followers(user_id).await?;
        Ok(views::users(self.storage, rows).await?)
    }
}
