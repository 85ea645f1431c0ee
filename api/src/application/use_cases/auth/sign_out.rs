use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{IdentityError, IdentityProvider};

/// Revokes every token issued to the caller.
pub struct SignOut<'a, I: IdentityProvider + ?Sized> {
    pub identity: &'a I,
}

impl<'a, I: IdentityProvider + ?Sized> SignOut<'a, I> {
    pub async fn execute(&self, access_token: &str) -> AppResult<()> {
        self.identity
            .global_sign_out(access_token)
            .await
            .map_err(|err| match err {
                IdentityError::Rejected { message, .. } => AppError::Unauthorized(message),
                other => other.into(),
            })
    }
}
