use crate::application::dto::users::UserBaseDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{IdentityError, IdentityProvider};
use crate::application::ports::storage_port::ImageStorage;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::views;

/// Resolves the caller of an access token to the local user record.
pub struct GetMe<'a, R, I, S>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub users: &'a R,
    pub identity: &'a I,
    pub storage: &'a S,
}

impl<'a, R, I, S> GetMe<'a, R, I, S>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, access_token: &str) -> AppResult<UserBaseDto> {
        let email = self
            .identity
            .get_user_email(access_token)
            .await
            .map_err(|err| match err {
                IdentityError::Rejected { message, .. } => AppError::Unauthorized(message),
                other => other.into(),
            })?;
        let user = self
            .users
            .find_by_email(&email.to_ascii_lowercase())
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;
        Ok(views::user_base(self.storage, user).await?)
    }
}
