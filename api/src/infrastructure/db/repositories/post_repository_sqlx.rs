use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Post, PostWithAuthor};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::user_repository_sqlx::{
    AUTHOR_COLUMNS, author_from_row,
};

const POST_COLUMNS: &str = "id, caption, image_key, user_id, created_at, deleted_at";

fn post_from_row(r: &PgRow) -> Post {
    Post {
        id: r.get("id"),
        caption: r.get("caption"),
        image_key: r.get("image_key"),
        user_id: r.get("user_id"),
        created_at: r.get("created_at"),
        deleted_at: r.get("deleted_at"),
    }
}

fn feed_row(r: &PgRow) -> PostWithAuthor {
    PostWithAuthor {
        post: post_from_row(r),
        author: author_from_row(r),
        likes_count: r.get("likes_count"),
        comments_count: r.get("comments_count"),
    }
}

fn feed_query(filter: &str) -> String {
    format!(
        r#"SELECT p.id, p.caption, p.image_key, p.user_id, p.created_at, p.deleted_at,
                  {AUTHOR_COLUMNS},
                  (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count,
                  (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count
           FROM posts p
           JOIN users u ON u.id = p.user_id
           WHERE p.deleted_at IS NULL {filter}
           ORDER BY p.created_at DESC"#
    )
}

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<PostWithAuthor>> {
        let rows = sqlx::query(&feed_query(""))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(feed_row).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<PostWithAuthor>> {
        let rows = sqlx::query(&feed_query("AND p.user_id = $1"))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(feed_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn create(&self, user_id: Uuid, caption: &str, image_key: &str) -> anyhow::Result<Post> {
        let row = sqlx::query(&format!(
            "INSERT INTO posts (user_id, caption, image_key) VALUES ($1, $2, $3) RETURNING {POST_COLUMNS}"
        ))
        .bind(user_id)
        .bind(caption)
        .bind(image_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(post_from_row(&row))
    }

    async fn update_caption(&self, id: Uuid, caption: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE posts SET caption = $2, updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(caption)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE posts SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
