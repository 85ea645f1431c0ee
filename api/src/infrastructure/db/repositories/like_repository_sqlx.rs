use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::like_repository::LikeRepository;
use crate::infrastructure::db::PgPool;

pub struct SqlxLikeRepository {
    pub pool: PgPool,
}

impl SqlxLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for SqlxLikeRepository {
    async fn like(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO likes (user_id, post_id) VALUES ($1, $2)
               ON CONFLICT (post_id, user_id) DO NOTHING"#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
