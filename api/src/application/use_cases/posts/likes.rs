use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::like_repository::LikeRepository;
use crate::application::ports::post_repository::PostRepository;

pub struct LikePost<'a, P, L>
where
    P: PostRepository + ?Sized,
    L: LikeRepository + ?Sized,
{
    pub posts: &'a P,
    pub likes: &'a L,
}

impl<'a, P, L> LikePost<'a, P, L>
where
    P: PostRepository + ?Sized,
    L: LikeRepository + ?Sized,
{
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<()> {
        self.ensure_post(post_id).await?;
        self.likes.like(user_id, post_id).await?;
        Ok(())
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> AppResult<()> {
        if !self.likes.unlike(user_id, post_id).await? {
            return Err(AppError::not_found("like"));
        }
        Ok(())
    }

    pub async fn count(&self, post_id: Uuid) -> AppResult<i64> {
        self.ensure_post(post_id).await?;
        Ok(self.likes.count_for_post(post_id).await?)
    }

    async fn ensure_post(&self, post_id: Uuid) -> AppResult<()> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("post")),
        }
    }
}
