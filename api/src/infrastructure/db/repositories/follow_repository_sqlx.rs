use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::follow_repository::FollowRepository;
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::user_repository_sqlx::user_from_row;

pub struct SqlxFollowRepository {
    pub pool: PgPool,
}

impl SqlxFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for SqlxFollowRepository {
    async fn follow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO follow_relations (from_id, to_id) VALUES ($1, $2)
               ON CONFLICT (from_id, to_id) DO NOTHING"#,
        )
        .bind(from_id)
        .bind(to_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn unfollow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM follow_relations WHERE from_id = $1 AND to_id = $2")
            .bind(from_id)
            .bind(to_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn is_following(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follow_relations WHERE from_id = $1 AND to_id = $2)",
        )
        .bind(from_id)
        .bind(to_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_follows(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follow_relations WHERE from_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn count_followers(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follow_relations WHERE to_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn list_follows(&self, user_id: Uuid) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.email, u.name, u.bio, u.icon_image_key, u.created_at
               FROM follow_relations f
               JOIN users u ON u.id = f.to_id
               WHERE f.from_id = $1
               ORDER BY f.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn list_followers(&self, user_id: Uuid) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.email, u.name, u.bio, u.icon_image_key, u.created_at
               FROM follow_relations f
               JOIN users u ON u.id = f.from_id
               WHERE f.to_id = $1
               ORDER BY f.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }
}
