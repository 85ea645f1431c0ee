use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Returns true when a new like was recorded, false when it already existed.
    async fn like(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool>;
    async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool>;
    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64>;
    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool>;
}
