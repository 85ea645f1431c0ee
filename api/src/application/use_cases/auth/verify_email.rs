use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{IdentityError, IdentityProvider};
use crate::domain::users::user::normalize_email;

pub struct VerifyEmail<'a, I: IdentityProvider + ?Sized> {
    pub identity: &'a I,
}

impl<'a, I: IdentityProvider + ?Sized> VerifyEmail<'a, I> {
    pub async fn execute(&self, email: &str, code: &str) -> AppResult<()> {
        let code = code.trim();
        if email.trim().is_empty() || code.is_empty() {
            return Err(AppError::Validation("email and code are required".into()));
        }
        let email = normalize_email(email)?;
        self.identity
            .confirm_sign_up(&email, code)
            .await
            .map_err(|err| match err {
                IdentityError::Rejected { code, message } => {
                    tracing::debug!(%code, %message, "confirm_sign_up_rejected");
                    AppError::Validation("invalid confirmation code".into())
                }
                other => other.into(),
            })
    }
}
