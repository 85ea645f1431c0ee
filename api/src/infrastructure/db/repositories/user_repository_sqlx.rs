use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;

pub(crate) const USER_COLUMNS: &str = "id, email, name, bio, icon_image_key, created_at";

pub(crate) fn user_from_row(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
        bio: r.get("bio"),
        icon_image_key: r.get("icon_image_key"),
        created_at: r.get("created_at"),
    }
}

/// Author columns joined as `author_*` next to another entity.
pub(crate) fn author_from_row(r: &PgRow) -> User {
    User {
        id: r.get("author_id"),
        email: r.get("author_email"),
        name: r.get("author_name"),
        bio: r.get("author_bio"),
        icon_image_key: r.get("author_icon_image_key"),
        created_at: r.get("author_created_at"),
    }
}

pub(crate) const AUTHOR_COLUMNS: &str = "u.id AS author_id, u.email AS author_email, u.name AS author_name, \
     u.bio AS author_bio, u.icon_image_key AS author_icon_image_key, u.created_at AS author_created_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, name: &str, email: &str) -> anyhow::Result<User> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(user_from_row(&row))
    }

    async fn exists_email(&self, email: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        bio: &str,
        icon_image_key: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE users SET name = $2, bio = $3, icon_image_key = $4, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(name)
        .bind(bio)
        .bind(icon_image_key)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
