use uuid::Uuid;

use crate::application::dto::pets::PetDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::storage_port::{ImageStorage, ImageUpload};
use crate::application::services::views;
use crate::application::use_cases::pets::create_pet::{PET_IMAGE_DIR, PetForm};
use crate::domain::pets::pet::Pet;

pub(crate) async fn owned_pet<R: PetRepository + ?Sized>(
    pets: &R,
    actor_id: Uuid,
    pet_id: Uuid,
) -> AppResult<Pet> {
    let pet = pets
        .find_by_id(pet_id)
        .await?
        .ok_or_else(|| AppError::not_found("pet"))?;
    if pet.owner_id != actor_id {
        return Err(AppError::Forbidden("not the owner of this pet".into()));
    }
    Ok(pet)
}

pub struct UpdatePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub pets: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> UpdatePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        pet_id: Uuid,
        form: &PetForm,
        image: Option<ImageUpload>,
    ) -> AppResult<PetDto> {
        let attrs = form.parse()?;
        let existing = owned_pet(self.pets, actor_id, pet_id).await?;

        let new_key = match image.filter(|img| !img.bytes.is_empty()) {
            Some(img) => Some(img.store(self.storage, PET_IMAGE_DIR).await.map_err(|err| {
                tracing::error!(error = ?err, pet_id = %pet_id, "upload_pet_image_failed");
                err
            })?),
            None => None,
        };

        let updated = match self.pets.update(pet_id, &attrs, new_key.as_deref()).await {
            Ok(Some(pet)) => pet,
            Ok(None) => {
                self.discard(new_key.as_deref()).await;
                return Err(AppError::not_found("pet"));
            }
            Err(err) => {
                tracing::error!(error = ?err, pet_id = %pet_id, "update_pet_failed");
                self.discard(new_key.as_deref()).await;
                return Err(err.into());
            }
        };

        if new_key.is_some() {
            if let Err(err) = self.storage.delete_image(&existing.image_key).await {
                tracing::warn!(error = ?err, key = %existing.image_key, "delete_old_pet_image_failed");
            }
        }
        Ok(views::pet(self.storage, updated).await?)
    }

    async fn discard(&self, key: Option<&str>) {
        let Some(key) = key else { return };
        if let Err(err) = self.storage.delete_image(key).await {
            tracing::warn!(error = ?err, key = %key, "orphan_pet_image");
        }
    }
}
