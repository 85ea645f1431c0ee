use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::comments::comment::{Comment, CommentWithAuthor};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, post_id: Uuid, content: &str)
    -> anyhow::Result<Comment>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64>;
    /// Oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<CommentWithAuthor>>;
}
