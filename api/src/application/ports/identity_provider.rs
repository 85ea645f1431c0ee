use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub id_token: String,
}

/// Errors the hosted identity provider reports back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider answered and refused (bad code, wrong password, ...).
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), IdentityError>;
    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError>;
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, IdentityError>;
    async fn get_user_email(&self, access_token: &str) -> Result<String, IdentityError>;
    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}
