use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::comments::comment::{Comment, validate_content};

pub struct CreateComment<'a, P, C>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub posts: &'a P,
    pub comments: &'a C,
}

impl<'a, P, C> CreateComment<'a, P, C>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(&self, author_id: Uuid, post_id: Uuid, content: &str) -> AppResult<Comment> {
        let content = validate_content(content)?;
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::not_found("post"));
        }
        let comment = self
            .comments
            .create(author_id, post_id, &content)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, post_id = %post_id, "create_comment_failed");
                err
            })?;
        Ok(comment)
    }
}
