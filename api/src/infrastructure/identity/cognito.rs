use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, AuthenticationResultType};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::application::ports::identity_provider::{
    AuthTokens, IdentityError, IdentityProvider, RefreshedTokens,
};
use crate::bootstrap::config::Config;

/// Cognito user pool client for the app-client (unauthenticated) operations.
pub struct CognitoIdentityProvider {
    client: Client,
    client_id: String,
    client_secret: Option<String>,
}

/// `SECRET_HASH` = base64(HMAC-SHA256(client_secret, username + client_id)).
pub fn secret_hash(
    client_secret: &str,
    username: &str,
    client_id: &str,
) -> anyhow::Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(client_secret.as_bytes())
        .map_err(|e| anyhow!("invalid client secret: {e}"))?;
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Service errors keep their Cognito code; anything else is a transport failure.
fn sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> IdentityError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(service) => {
            let e = service.err();
            let code = e.code().unwrap_or("Unknown").to_string();
            let message = e.message().unwrap_or_default().to_string();
            tracing::warn!(%operation, %code, %message, "cognito_rejected");
            IdentityError::Rejected { code, message }
        }
        other => IdentityError::Transport(anyhow!(
            "cognito {operation} failed: {}",
            DisplayErrorContext(&other)
        )),
    }
}

#[derive(Debug)]
struct IssuedTokens {
    access_token: String,
    id_token: String,
    refresh_token: Option<String>,
}

fn issued_tokens(
    result: Option<&AuthenticationResultType>,
    challenge: Option<&str>,
) -> Result<IssuedTokens, IdentityError> {
    match (result, challenge) {
        (Some(result), _) => {
            let access_token = result
                .access_token()
                .ok_or_else(|| anyhow!("InitiateAuth returned no access token"))?;
            let id_token = result
                .id_token()
                .ok_or_else(|| anyhow!("InitiateAuth returned no id token"))?;
            Ok(IssuedTokens {
                access_token: access_token.to_string(),
                id_token: id_token.to_string(),
                refresh_token: result.refresh_token().map(str::to_string),
            })
        }
        (None, Some(challenge)) => Err(IdentityError::Rejected {
            code: "ChallengeRequired".into(),
            message: format!("additional challenge required: {challenge}"),
        }),
        (None, None) => Err(IdentityError::Transport(anyhow!(
            "InitiateAuth returned no authentication result"
        ))),
    }
}

fn email_attribute(attributes: &[AttributeType]) -> Option<String> {
    attributes
        .iter()
        .find(|a| a.name() == "email")
        .and_then(|a| a.value())
        .map(str::to_string)
}

fn attribute(name: &str, value: &str) -> Result<AttributeType, IdentityError> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .with_context(|| format!("invalid user attribute {name}"))
        .map_err(IdentityError::from)
}

impl CognitoIdentityProvider {
    pub fn new(shared: &SdkConfig, cfg: &Config) -> Self {
        let mut builder = aws_sdk_cognitoidentityprovider::config::Builder::from(shared);
        if let Some(endpoint) = &cfg.cognito_endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }
        Self::from_client(
            Client::from_conf(builder.build()),
            cfg.cognito_client_id.clone(),
            cfg.cognito_client_secret.clone(),
        )
    }

    pub fn from_client(
        client: Client,
        client_id: impl Into<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            client_secret,
        }
    }

    fn hash_for(&self, username: &str) -> Result<Option<String>, IdentityError> {
        match self.client_secret.as_deref() {
            Some(secret) => Ok(Some(secret_hash(secret, username, &self.client_id)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), IdentityError> {
        self.client
            .sign_up()
            .client_id(&self.client_id)
            .username(email)
            .password(password)
            .user_attributes(attribute("email", email)?)
            .user_attributes(attribute("name", name)?)
            .set_secret_hash(self.hash_for(email)?)
            .send()
            .await
            .map_err(|e| sdk_error("SignUp", e))?;
        Ok(())
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        self.client
            .confirm_sign_up()
            .client_id(&self.client_id)
            .username(email)
            .confirmation_code(code)
            .set_secret_hash(self.hash_for(email)?)
            .send()
            .await
            .map_err(|e| sdk_error("ConfirmSignUp", e))?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let mut req = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", email)
            .auth_parameters("PASSWORD", password);
        if let Some(hash) = self.hash_for(email)? {
            req = req.auth_parameters("SECRET_HASH", hash);
        }
        let out = req.send().await.map_err(|e| sdk_error("InitiateAuth", e))?;
        let tokens = issued_tokens(
            out.authentication_result(),
            out.challenge_name().map(|c| c.as_str()),
        )?;
        Ok(AuthTokens {
            access_token: tokens.access_token,
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token.unwrap_or_default(),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, IdentityError> {
        let out = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::RefreshTokenAuth)
            .auth_parameters("REFRESH_TOKEN", refresh_token)
            .send()
            .await
            .map_err(|e| sdk_error("InitiateAuth", e))?;
        let tokens = issued_tokens(
            out.authentication_result(),
            out.challenge_name().map(|c| c.as_str()),
        )?;
        Ok(RefreshedTokens {
            access_token: tokens.access_token,
            id_token: tokens.id_token,
        })
    }

    async fn get_user_email(&self, access_token: &str) -> Result<String, IdentityError> {
        let out = self
            .client
            .get_user()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| sdk_error("GetUser", e))?;
        email_attribute(out.user_attributes())
            .ok_or_else(|| IdentityError::Transport(anyhow!("user has no email attribute")))
    }

    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.client
            .global_sign_out()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| sdk_error("GlobalSignOut", e))?;
        Ok(())
    }
}
