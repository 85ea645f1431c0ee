use uuid::Uuid;

use crate::application::dto::posts::PostDto;
use crate::application::error::AppResult;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::services::views;

pub struct ListPosts<'a, P, S>
where
    P: PostRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub posts: &'a P,
    pub storage: &'a S,
}

impl<'a, P, S> ListPosts<'a, P, S>
where
    P: PostRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, author: Option<Uuid>) -> AppResult<Vec<PostDto>> {
        let rows = match author {
            Some(user_id) => self.posts.list_by_user(user_id).await?,
            None => self.posts.list_all().await?,
        };
        Ok(views::posts(self.storage, rows).await?)
    }
}
