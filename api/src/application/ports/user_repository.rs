use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, name: &str, email: &str) -> anyhow::Result<User>;
    async fn exists_email(&self, email: &str) -> anyhow::Result<bool>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    // Returns false when no row matched.
    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        bio: &str,
        icon_image_key: Option<&str>,
    ) -> anyhow::Result<bool>;
}
