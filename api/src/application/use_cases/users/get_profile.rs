use uuid::Uuid;

use crate::application::dto::users::UserProfileDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::views;

pub struct GetProfile<'a, U, P, Pe, F, S>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    Pe: PetRepository + ?Sized,
    F: FollowRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
    pub pets: &'a Pe,
    pub follows: &'a F,
    pub storage: &'a S,
}

impl<'a, U, P, Pe, F, S> GetProfile<'a, U, P, Pe, F, S>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    Pe: PetRepository + ?Sized,
    F: FollowRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> AppResult<UserProfileDto> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;
        let posts = self.posts.list_by_user(user_id).await?;
        let pets = self.pets.list_by_owner(user_id).await?;
        let follows_count = self.follows.count_follows(user_id).await?;
        let follower_count = self.follows.count_followers(user_id).await?;
        Ok(UserProfileDto {
            user: views::user_base(self.storage, user).await?,
            posts: views::posts(self.storage, posts).await?,
            pets: views::pets(self.storage, pets).await?,
            follows_count,
            follower_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;

    #[tokio::test]
    async fn aggregates_posts_pets_and_follow_counts() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let ken = store.user("Ken", "ken@example.com").await;
        store.post(&hana, "first walk").await;
        store.pet(&hana, "Pochi").await;
        store.follow(ken.id, hana.id).await.unwrap();

        let uc = GetProfile {
            users: &store,
            posts: &store,
            pets: &store,
            follows: &store,
            storage: &store,
        };
        let profile = uc.execute(hana.id).await.unwrap();
        assert_eq!(profile.user.name, "Hana");
        assert_eq!(profile.posts.len(), 1);
        assert_eq!(profile.posts[0].author.id, hana.id);
        assert_eq!(profile.pets.len(), 1);
        assert_eq!(profile.follows_count, 0);
        assert_eq!(profile.follower_count, 1);

        assert!(matches!(
            uc.execute(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
