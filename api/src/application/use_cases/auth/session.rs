use crate::application::error::{AppError, AppResult};
use crate::application::ports::token_verifier::{TokenVerifier, VerifiedClaims};

pub struct GetSession<'a, V: TokenVerifier + ?Sized> {
    pub verifier: &'a V,
}

impl<'a, V: TokenVerifier + ?Sized> GetSession<'a, V> {
    pub async fn execute(&self, token: &str) -> AppResult<VerifiedClaims> {
        self.verifier.verify(token).await.map_err(|err| {
            tracing::debug!(error = ?err, "session_token_rejected");
            AppError::Unauthorized("Invalid or expired token".into())
        })
    }
}
