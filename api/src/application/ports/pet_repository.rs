use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::pets::pet::{Pet, PetAttributes};

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Pet>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>>;
    async fn create(
        &self,
        owner_id: Uuid,
        attrs: &PetAttributes,
        image_key: &str,
    ) -> anyhow::Result<Pet>;
    // image_key: None keeps the stored key
    async fn update(
        &self,
        id: Uuid,
        attrs: &PetAttributes,
        image_key: Option<&str>,
    ) -> anyhow::Result<Option<Pet>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
