use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::use_cases::pets::update_pet::owned_pet;

pub struct DeletePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub pets: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> DeletePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, actor_id: Uuid, pet_id: Uuid) -> AppResult<()> {
        let pet = owned_pet(self.pets, actor_id, pet_id).await?;
        if !self.pets.delete(pet_id).await? {
            return Err(AppError::not_found("pet"));
        }
        // Row is gone already; a failed object delete only leaves an orphan.
        if let Err(err) = self.storage.delete_image(&pet.image_key).await {
            tracing::warn!(error = ?err, key = %pet.image_key, "delete_pet_image_failed");
        }
        Ok(())
    }
}
