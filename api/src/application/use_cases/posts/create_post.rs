use uuid::Uuid;

use crate::application::dto::posts::PostDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::{ImageStorage, ImageUpload};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::views;
use crate::domain::posts::post::{PostWithAuthor, validate_caption};

pub const POST_IMAGE_DIR: &str = "posts";

pub struct CreatePost<'a, U, P, S>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
    pub storage: &'a S,
}

impl<'a, U, P, S> CreatePost<'a, U, P, S>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(
        &self,
        author_id: Uuid,
        caption: &str,
        image: Option<ImageUpload>,
    ) -> AppResult<PostDto> {
        let caption = validate_caption(caption)?;
        let image = image
            .filter(|img| !img.bytes.is_empty())
            .ok_or_else(|| AppError::Validation("image is required".into()))?;
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        let key = image
            .store(self.storage, POST_IMAGE_DIR)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, user_id = %author_id, "upload_post_image_failed");
                err
            })?;
        let post = match self.posts.create(author_id, &caption, &key).await {
            Ok(p) => p,
            Err(err) => {
                tracing::error!(error = ?err, user_id = %author_id, "create_post_failed");
                if let Err(cleanup) = self.storage.delete_image(&key).await {
                    tracing::warn!(error = ?cleanup, key = %key, "orphan_post_image");
                }
                return Err(err.into());
            }
        };
        let row = PostWithAuthor {
            post,
            author,
            likes_count: 0,
            comments_count: 0,
        };
        Ok(views::post(self.storage, row).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MemoryStore, upload};

    #[tokio::test]
    async fn uploads_image_under_posts_and_returns_view() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let uc = CreatePost {
            users: &store,
            posts: &store,
            storage: &store,
        };
        let post = uc
            .execute(hana.id, "  sunny day  ", Some(upload("walk.png")))
            .await
            .unwrap();
        assert_eq!(post.caption, "sunny day");
        assert_eq!(post.author.id, hana.id);
        assert!(post.image_url.contains("/posts/"));
        assert_eq!(post.likes_count, 0);
        assert_eq!(store.object_count(), 1);
    }

    #[tokio::test]
    async fn caption_and_image_are_required() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let uc = CreatePost {
            users: &store,
            posts: &store,
            storage: &store,
        };
        assert!(matches!(
            uc.execute(hana.id, " ", Some(upload("a.png"))).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(hana.id, "hi", None).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.object_count(), 0);
    }
}
