use crate::application::dto::users::UserBaseDto;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{AuthTokens, IdentityError, IdentityProvider};
use crate::application::ports::storage_port::ImageStorage;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::views;
use crate::domain::users::user::normalize_email;

pub struct SignIn<'a, R, I, S>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub users: &'a R,
    pub identity: &'a I,
    pub storage: &'a S,
}

#[derive(Debug, Clone)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserBaseDto,
    pub tokens: AuthTokens,
}

impl<'a, R, I, S> SignIn<'a, R, I, S>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
    S: ImageStorage + ?Sized,
{
    pub async fn execute(&self, req: &SignInRequest) -> AppResult<SignedIn> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::Validation("email and password are required".into()));
        }
        let email = normalize_email(&req.email)?;
        let tokens = self
            .identity
            .sign_in(&email, &req.password)
            .await
            .map_err(|err| match err {
                IdentityError::Rejected { message, .. } => AppError::Unauthorized(message),
                other => other.into(),
            })?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;
        let user = views::user_base(self.storage, user).await?;
        Ok(SignedIn { user, tokens })
    }
}
