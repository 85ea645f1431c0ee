use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::pet_repository::PetRepository;
use crate::domain::pets::pet::{Pet, PetAttributes};
use crate::infrastructure::db::PgPool;

const PET_COLUMNS: &str = "id, name, pet_type, species, birth_day, image_key, owner_id, created_at";

fn pet_from_row(r: &PgRow) -> anyhow::Result<Pet> {
    let pet_type: String = r.get("pet_type");
    Ok(Pet {
        id: r.get("id"),
        name: r.get("name"),
        birth_day: r.get("birth_day"),
        pet_type: pet_type
            .parse()
            .map_err(|e| anyhow::anyhow!("corrupt pet row: {e}"))?,
        species: r.get("species"),
        image_key: r.get("image_key"),
        owner_id: r.get("owner_id"),
        created_at: r.get("created_at"),
    })
}

pub struct SqlxPetRepository {
    pub pool: PgPool,
}

impl SqlxPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for SqlxPetRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Pet>> {
        let rows = sqlx::query(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE owner_id = $1 ORDER BY created_at ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(pet_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>> {
        let row = sqlx::query(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(pet_from_row).transpose()
    }

    async fn create(
        &self,
        owner_id: Uuid,
        attrs: &PetAttributes,
        image_key: &str,
    ) -> anyhow::Result<Pet> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO pets (owner_id, name, pet_type, species, birth_day, image_key)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {PET_COLUMNS}"#
        ))
        .bind(owner_id)
        .bind(&attrs.name)
        .bind(attrs.pet_type.as_str())
        .bind(&attrs.species)
        .bind(&attrs.birth_day)
        .bind(image_key)
        .fetch_one(&self.pool)
        .await?;
        pet_from_row(&row)
    }

    async fn update(
        &self,
        id: Uuid,
        attrs: &PetAttributes,
        image_key: Option<&str>,
    ) -> anyhow::Result<Option<Pet>> {
        let row = sqlx::query(&format!(
            r#"UPDATE pets SET name = $2, pet_type = $3, species = $4, birth_day = $5,
                      image_key = COALESCE($6, image_key), updated_at = now()
               WHERE id = $1
               RETURNING {PET_COLUMNS}"#
        ))
        .bind(id)
        .bind(&attrs.name)
        .bind(attrs.pet_type.as_str())
        .bind(&attrs.species)
        .bind(&attrs.birth_day)
        .bind(image_key)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(pet_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
