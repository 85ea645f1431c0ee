use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Id,
    Access,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifiedClaims {
    pub sub: String,
    pub email: Option<String>,
    pub token_use: TokenUse,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> anyhow::Result<VerifiedClaims>;
}
