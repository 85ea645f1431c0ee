use uuid::Uuid;

use crate::application::dto::comments::CommentDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::services::views;

pub struct ListComments<'a, P, C, S>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub posts: &'a P,
    pub comments: &'a C,
    pub storage: &'a S,
}

impl<'a, P, C, S> ListComments<'a, P, C, S>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    /// Soft-deleted posts count as missing.
    async fn ensure_post(&self, post_id: Uuid) -> AppResult<()> {
        self.posts
            .find_by_id(post_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("post"))
    }

    pub async fn execute(&self, post_id: Uuid) -> AppResult<Vec<CommentDto>> {
        self.ensure_post(post_id).await?;
        let rows = self.comments.list_for_post(post_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(views::comment(self.storage, row).await?);
        }
        Ok(out)
    }

    pub async fn count(&self, post_id: Uuid) -> AppResult<i64> {
        self.ensure_post(post_id).await?;
        Ok(self.comments.count_for_post(post_id).await?)
    }
}
