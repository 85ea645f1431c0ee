use uuid::Uuid;

use crate::domain::pets::pet::PetType;

#[derive(Debug, Clone)]
pub struct PetDto {
    pub id: Uuid,
    pub name: String,
    pub birth_day: String,
    pub pet_type: PetType,
    pub species: String,
    pub image_url: String,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
