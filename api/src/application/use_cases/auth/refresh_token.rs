use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{
    IdentityError, IdentityProvider, RefreshedTokens,
};

pub struct RefreshToken<'a, I: IdentityProvider + ?Sized> {
    pub identity: &'a I,
}

impl<'a, I: IdentityProvider + ?Sized> RefreshToken<'a, I> {
    pub async fn execute(&self, refresh_token: &str) -> AppResult<RefreshedTokens> {
        let token = refresh_token.trim();
        if token.is_empty() {
            return Err(AppError::Validation("refresh token is required".into()));
        }
        self.identity.refresh(token).await.map_err(|err| match err {
            IdentityError::Rejected { message, .. } => AppError::Unauthorized(message),
            other => other.into(),
        })
    }
}
