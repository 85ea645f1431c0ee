use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::follows::follow::ensure_not_self;

pub struct FollowUser<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowRepository + ?Sized,
{
    pub users: &'a U,
    pub follows: &'a F,
}

impl<'a, U, F> FollowUser<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FollowRepository + ?Sized,
{
    /// Following someone twice is a no-op.
    pub async fn execute(&self, from_id: Uuid, to_id: Uuid) -> AppResult<()> {
        ensure_not_self(from_id, to_id)?;
        if self.users.find_by_id(to_id).await?.is_none() {
            return Err(AppError::not_found("user"));
        }
        let created = self.follows.follow(from_id, to_id).await?;
        if created {
            tracing::debug!(from = %from_id, to = %to_id, "follow_created");
        }
        Ok(())
    }
}

pub struct UnfollowUser<'a, F: FollowRepository + ?Sized> {
    pub follows: &'a F,
}

impl<'a, F: FollowRepository + ?Sized> UnfollowUser<'a, F> {
    pub async fn execute(&self, from_id: Uuid, to_id: Uuid) -> AppResult<()> {
        if !self.follows.unfollow(from_id, to_id).await? {
            return Err(AppError::not_found("follow relation"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;

    #[tokio::test]
    async fn follow_is_idempotent_and_unfollow_removes_it() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let ken = store.user("Ken", "ken@example.com").await;
        let follow = FollowUser {
            users: &store,
            follows: &store,
        };
        follow.execute(ken.id, hana.id).await.unwrap();
        follow.execute(ken.id, hana.id).await.unwrap();
        assert_eq!(store.count_followers(hana.id).await.unwrap(), 1);

        let unfollow = UnfollowUser { follows: &store };
        unfollow.execute(ken.id, hana.id).await.unwrap();
        assert!(!store.is_following(ken.id, hana.id).await.unwrap());
        assert!(matches!(
            unfollow.execute(ken.id, hana.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_self_follow_and_unknown_target() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let follow = FollowUser {
            users: &store,
            follows: &store,
        };
        assert!(matches!(
            follow.execute(hana.id, hana.id).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            follow.execute(hana.id, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
