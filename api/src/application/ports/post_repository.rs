use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::posts::post::{Post, PostWithAuthor};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Live posts, newest first.
    async fn list_all(&self) -> anyhow::Result<Vec<PostWithAuthor>>;
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<PostWithAuthor>>;
    /// Soft-deleted posts are not returned.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    async fn create(&self, user_id: Uuid, caption: &str, image_key: &str) -> anyhow::Result<Post>;
    async fn update_caption(&self, id: Uuid, caption: &str) -> anyhow::Result<bool>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
