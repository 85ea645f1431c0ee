use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Idempotent; returns true when the relation was newly created.
    async fn follow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool>;
    async fn unfollow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool>;
    async fn is_following(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool>;
    /// How many users `user_id` follows.
    async fn count_follows(&self, user_id: Uuid) -> anyhow::Result<i64>;
    /// How many users follow `user_id`.
    async fn count_followers(&self, user_id: Uuid) -> anyhow::Result<i64>;
    async fn list_follows(&self, user_id: Uuid) -> anyhow::Result<Vec<User>>;
    async fn list_followers(&self, user_id: Uuid) -> anyhow::Result<Vec<User>>;
}
