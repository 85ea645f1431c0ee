use uuid::Uuid;

use crate::application::dto::pets::PetDto;
use crate::application::error::AppResult;
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::services::views;

pub struct ListPets<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub pets: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> ListPets<'a, R, S>
where
    R: PetRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, owner_id: Uuid) -> AppResult<Vec<PetDto>> {
        let rows = self.pets.list_by_owner(owner_id).await?;
        Ok(views::pets(self.storage, rows).await?)
    }
}
