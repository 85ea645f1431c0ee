use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Post, validate_caption};

pub(crate) async fn owned_post<P: PostRepository + ?Sized>(
    posts: &P,
    actor_id: Uuid,
    post_id: Uuid,
) -> AppResult<Post> {
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;
    if post.user_id != actor_id {
        return Err(AppError::Forbidden("not the author of this post".into()));
    }
    Ok(post)
}

pub struct UpdatePost<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> UpdatePost<'a, P> {
    pub async fn execute(&self, actor_id: Uuid, post_id: Uuid, caption: &str) -> AppResult<()> {
        let caption = validate_caption(caption)?;
        owned_post(self.posts, actor_id, post_id).await?;
        if !self.posts.update_caption(post_id, &caption).await? {
            return Err(AppError::not_found("post"));
        }
        Ok(())
    }
}
