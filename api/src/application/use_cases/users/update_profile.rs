use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::storage_port::{ImageStorage, ImageUpload};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{validate_bio, validate_name};

pub const PROFILE_IMAGE_DIR: &str = "profile";

pub struct UpdateProfile<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub users: &'a U,
    pub storage: &'a S,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileInput {
    pub name: String,
    pub bio: String,
    pub image: Option<ImageUpload>,
}

impl<'a, U, S> UpdateProfile<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: ImageStorage + ?Sized,
{
    /// Returns the icon key stored after the update, if any.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        input: UpdateProfileInput,
    ) -> AppResult<Option<String>> {
        if actor_id != target_id {
            return Err(AppError::Forbidden(
                "you can only update your own profile".into(),
            ));
        }
        let name = validate_name(&input.name)?;
        let bio = validate_bio(&input.bio)?;
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        let previous = user.icon_image_key.clone();
        let uploaded = match input.image {
            Some(image) => Some(image.store(self.storage, PROFILE_IMAGE_DIR).await.map_err(
                |err| {
                    tracing::error!(error = ?err, user_id = %target_id, "upload_icon_failed");
                    err
                },
            )?),
            None => None,
        };
        let icon_key = uploaded.clone().or_else(|| previous.clone());

        let saved = self
            .users
            .update_profile(target_id, &name, &bio, icon_key.as_deref())
            .await;
        let failure = match saved {
            Ok(true) => None,
            Ok(false) => Some(AppError::not_found("user")),
            Err(err) => {
                tracing::error!(error = ?err, user_id = %target_id, "update_profile_failed");
                Some(err.into())
            }
        };
        if let Some(err) = failure {
            if let Some(key) = uploaded.as_deref() {
                if let Err(cleanup) = self.storage.delete_image(key).await {
                    tracing::warn!(error = ?cleanup, key = %key, "orphan_icon_image");
                }
            }
            return Err(err);
        }

        if let Some(old) = previous.filter(|old| Some(old) != icon_key.as_ref()) {
            if let Err(err) = self.storage.delete_image(&old).await {
                tracing::warn!(error = ?err, key = %old, "delete_old_icon_failed");
            }
        }
        Ok(icon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MemoryStore, upload};

    #[tokio::test]
    async fn replaces_icon_and_removes_the_old_object() {
        let store = MemoryStore::new();
        let user = store.user("Hana", "hana@example.com").await;
        let uc = UpdateProfile {
            users: &store,
            storage: &store,
        };
        let first = uc
            .execute(
                user.id,
                user.id,
                UpdateProfileInput {
                    name: "Hana".into(),
                    bio: "cat person".into(),
                    image: Some(upload("a.png")),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(first.starts_with("profile/"));
        assert!(store.has_object(&first));

        let second = uc
            .execute(
                user.id,
                user.id,
                UpdateProfileInput {
                    name: "Hana S".into(),
                    bio: "cat person".into(),
                    image: Some(upload("b.png")),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_ne!(first, second);
        assert!(!store.has_object(&first));
        assert!(store.has_object(&second));
    }

    #[tokio::test]
    async fn keeps_existing_icon_without_new_image() {
        let store = MemoryStore::new();
        let user = store.user("Hana", "hana@example.com").await;
        let key = store.put_object("profile/keep.png");
        store
            .update_profile(user.id, "Hana", "", Some(&key))
            .await
            .unwrap();
        let uc = UpdateProfile {
            users: &store,
            storage: &store,
        };
        let out = uc
            .execute(
                user.id,
                user.id,
                UpdateProfileInput {
                    name: "Hana".into(),
                    bio: "new bio".into(),
                    image: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("profile/keep.png"));
        assert!(store.has_object(&key));
        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.bio, "new bio");
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let hana = store.user("Hana", "hana@example.com").await;
        let ken = store.user("Ken", "ken@example.com").await;
        let uc = UpdateProfile {
            users: &store,
            storage: &store,
        };
        let err = uc
            .execute(
                ken.id,
                hana.id,
                UpdateProfileInput {
                    name: "x".into(),
                    bio: String::new(),
                    image: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn failed_update_removes_the_new_icon() {
        let store = MemoryStore::new();
        let user = store.user("Hana", "hana@example.com").await;
        store.fail_updates();
        let uc = UpdateProfile {
            users: &store,
            storage: &store,
        };
        let err = uc
            .execute(
                user.id,
                user.id,
                UpdateProfileInput {
                    name: "Hana".into(),
                    bio: String::new(),
                    image: Some(upload("a.png")),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.object_count(), 0);
    }
}
