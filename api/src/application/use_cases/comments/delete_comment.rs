use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;

pub struct DeleteComment<'a, C: CommentRepository + ?Sized> {
    pub comments: &'a C,
}

impl<'a, C: CommentRepository + ?Sized> DeleteComment<'a, C> {
    pub async fn execute(&self, actor_id: Uuid, comment_id: Uuid) -> AppResult<()> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("comment"))?;
        if comment.user_id != actor_id {
            return Err(AppError::Forbidden("not the author of this comment".into()));
        }
        if !self.comments.delete(comment_id).await? {
            return Err(AppError::not_found("comment"));
        }
        Ok(())
    }
}
