use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::application::error::AppError;
use crate::application::ports::token_verifier::{TokenUse, VerifiedClaims};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::error_response;

/// `Json<T>` whose rejection is a 400 with a JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `Path<T>` whose rejection is a 400 with a JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Raw `Authorization: Bearer <token>` value.
pub struct BearerToken(pub String);

#[derive(Debug)]
pub enum AuthRejection {
    Missing,
    BadFormat,
    Invalid,
    UnknownUser,
    Unavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Missing => error_response(StatusCode::UNAUTHORIZED, "No token provided"),
            AuthRejection::BadFormat => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid token format")
            }
            AuthRejection::Invalid => {
                error_response(StatusCode::FORBIDDEN, "Invalid or expired token")
            }
            AuthRejection::UnknownUser => error_response(StatusCode::NOT_FOUND, "user not found"),
            AuthRejection::Unavailable => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AuthRejection::Missing)?;
        let value = header.to_str().map_err(|_| AuthRejection::BadFormat)?;
        match value.split_once(' ') {
            Some((scheme, token)) if scheme == "Bearer" && !token.trim().is_empty() => {
                Ok(BearerToken(token.trim().to_string()))
            }
            _ => Err(AuthRejection::BadFormat),
        }
    }
}

/// The verified caller, resolved to a local user record.
pub struct AuthUser {
    pub user: User,
    pub claims: VerifiedClaims,
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, ctx).await?;
        let claims = ctx.token_verifier().verify(&token).await.map_err(|err| {
            tracing::debug!(error = ?err, "token_rejected");
            AuthRejection::Invalid
        })?;

        let email = match (&claims.email, claims.token_use) {
            (Some(email), _) => email.clone(),
            // Access tokens carry no email claim; ask the provider who this is.
            (None, TokenUse::Access) => ctx
                .identity()
                .get_user_email(&token)
                .await
                .map_err(|err| {
                    tracing::debug!(error = ?err, "get_user_for_token_failed");
                    AuthRejection::Invalid
                })?
                .to_ascii_lowercase(),
            (None, TokenUse::Id) => return Err(AuthRejection::Invalid),
        };

        let user = ctx
            .user_repo()
            .find_by_email(&email)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "auth_user_lookup_failed");
                AuthRejection::Unavailable
            })?
            .ok_or(AuthRejection::UnknownUser)?;

        Ok(AuthUser {
            user,
            claims,
            token,
        })
    }
}
