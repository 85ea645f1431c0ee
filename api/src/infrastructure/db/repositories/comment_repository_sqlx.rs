use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::comments::comment::{Comment, CommentWithAuthor};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::user_repository_sqlx::{
    AUTHOR_COLUMNS, author_from_row,
};

fn comment_from_row(r: &PgRow) -> Comment {
    Comment {
        id: r.get("id"),
        content: r.get("content"),
        post_id: r.get("post_id"),
        user_id: r.get("user_id"),
        created_at: r.get("created_at"),
    }
}

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> anyhow::Result<Comment> {
        let row = sqlx::query(
            r#"INSERT INTO comments (user_id, post_id, content) VALUES ($1, $2, $3)
               RETURNING id, content, post_id, user_id, created_at"#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, content, post_id, user_id, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(comment_from_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(&format!(
            r#"SELECT c.id, c.content, c.post_id, c.user_id, c.created_at, {AUTHOR_COLUMNS}
               FROM comments c
               JOIN users u ON u.id = c.user_id
               WHERE c.post_id = $1
               ORDER BY c.created_at ASC"#
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| CommentWithAuthor {
                comment: comment_from_row(r),
                author: author_from_row(r),
            })
            .collect())
    }
}
