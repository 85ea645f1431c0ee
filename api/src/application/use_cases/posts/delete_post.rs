use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::post_repository::PostRepository;
use crate::application::use_cases::posts::update_post::owned_post;

/// Soft delete: the row and its image stay, the post disappears from listings.
pub struct DeletePost<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> DeletePost<'a, P> {
    pub async fn execute(&self, actor_id: Uuid, post_id: Uuid) -> AppResult<()> {
        owned_post(self.posts, actor_id, post_id).await?;
        if !self.posts.soft_delete(post_id).await? {
            return Err(AppError::not_found("post"));
        }
        Ok(())
    }
}
