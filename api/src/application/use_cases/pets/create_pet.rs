use uuid::Uuid;

use crate::application::dto::pets::PetDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::storage_port::{ImageStorage, ImageUpload};
use crate::application::services::views;
use crate::domain::pets::pet::PetAttributes;

pub const PET_IMAGE_DIR: &str = "pets";

/// Raw form fields; validated into `PetAttributes` by the use case.
#[derive(Debug, Clone, Default)]
pub struct PetForm {
    pub name: String,
    pub pet_type: String,
    pub species: String,
    pub birth_day: String,
}

impl PetForm {
    pub fn parse(&self) -> Result<PetAttributes, AppError> {
        Ok(PetAttributes::parse(
            &self.name,
            &self.pet_type,
            &self.species,
            &self.birth_day,
        )?)
    }
}

pub struct CreatePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub pets: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> CreatePet<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(
        &self,
        owner_id: Uuid,
        form: &PetForm,
        image: Option<ImageUpload>,
    ) -> AppResult<PetDto> {
        let attrs = form.parse()?;
        let image = image
            .filter(|img| !img.bytes.is_empty())
            .ok_or_else(|| AppError::Validation("image is required".into()))?;
        let key = image.store(self.storage, PET_IMAGE_DIR).await.map_err(|err| {
            tracing::error!(error = ?err, owner_id = %owner_id, "upload_pet_image_failed");
            err
        })?;
        let pet = match self.pets.create(owner_id, &attrs, &key).await {
            Ok(p) => p,
            Err(err) => {
                tracing::error!(error = ?err, owner_id = %owner_id, "create_pet_failed");
                if let Err(cleanup) = self.storage.delete_image(&key).await {
                    tracing::warn!(error = ?cleanup, key = %key, "orphan_pet_image");
                }
                return Err(err.into());
            }
        };
        Ok(views::pet(self.storage, pet).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MemoryStore, upload};
    use crate::application::use_cases::pets::list_pets::ListPets;
    use crate::domain::pets::pet::PetType;

    fn form(pet_type: &str, species: &str) -> PetForm {
        PetForm {
            name: "Tama".into(),
            pet_type: pet_type.into(),
            species: species.into(),
            birth_day: "2019-05-05".into(),
        }
    }

    #[tokio::test]
    async fn creates_pet_with_image_under_pets() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let uc = CreatePet {
            pets: &store,
            storage: &store,
        };
        let pet = uc
            .execute(hana.id, &form("Cat", "scottish_fold"), Some(upload("tama.jpg")))
            .await
            .unwrap();
        assert_eq!(pet.pet_type, PetType::Cat);
        assert!(pet.image_url.starts_with("https://signed.test/pets/"));

        let listed = ListPets {
            pets: &store,
            storage: &store,
        }
        .execute(hana.id)
        .await
        .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Tama");
    }

    #[tokio::test]
    async fn rejects_mismatched_species_and_missing_image() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let uc = CreatePet {
            pets: &store,
            storage: &store,
        };
        assert!(matches!(
            uc.execute(hana.id, &form("dog", "scottish_fold"), Some(upload("x.jpg")))
                .await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(hana.id, &form("dog", "pug"), None).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.object_count(), 0);
    }
}
