use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::token_verifier::TokenUse;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::refresh_token::RefreshToken;
use crate::application::use_cases::auth::session::GetSession;
use crate::application::use_cases::auth::sign_in::{SignIn, SignInRequest};
use crate::application::use_cases::auth::sign_out::SignOut;
use crate::application::use_cases::auth::sign_up::{SignUp, SignUpRequest};
use crate::application::use_cases::auth::verify_email::VerifyEmail;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiResult, ErrorBody};
use crate::presentation::http::extract::{BearerToken, JsonBody};
use crate::presentation::http::users::{MessageResponse, UserBase};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignUpResponse {
    pub message: String,
    pub user: UserBase,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyEmailBody {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub message: String,
    pub user: UserBase,
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshBody {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub id_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub sub: String,
    pub email: Option<String>,
    pub token_use: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/verify-email", post(verify_email))
        .route("/signin", post(sign_in))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .route("/signout", post(sign_out))
        .route("/session", get(session))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/auth/signup", tag = "Auth", request_body = SignUpBody, security(()), responses(
    (status = 200, body = SignUpResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn sign_up(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<SignUpBody>,
) -> ApiResult<Json<SignUpResponse>> {
    let users = ctx.user_repo();
    let identity = ctx.identity();
    let uc = SignUp {
        users: users.as_ref(),
        identity: identity.as_ref(),
    };
    let user = uc
        .execute(&SignUpRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user_signed_up");
    Ok(Json(SignUpResponse {
        message: "user registered, check your email for the confirmation code".into(),
        user: UserBase {
            id: user.id,
            email: user.email,
            name: user.name,
            bio: user.bio,
            icon_image_url: None,
        },
    }))
}

#[utoipa::path(post, path = "/auth/verify-email", tag = "Auth", request_body = VerifyEmailBody, security(()), responses(
    (status = 200, body = MessageResponse),
    (status = 400, body = ErrorBody)
))]
pub async fn verify_email(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<VerifyEmailBody>,
) -> ApiResult<Json<MessageResponse>> {
    let identity = ctx.identity();
    let uc = VerifyEmail {
        identity: identity.as_ref(),
    };
    uc.execute(&body.email, &body.code).await?;
    Ok(MessageResponse::new("email verified"))
}

#[utoipa::path(post, path = "/auth/signin", tag = "Auth", request_body = SignInBody, security(()), responses(
    (status = 200, body = SignInResponse),
    (status = 401, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn sign_in(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<SignInBody>,
) -> ApiResult<Json<SignInResponse>> {
    let users = ctx.user_repo();
    let identity = ctx.identity();
    let storage = ctx.image_storage();
    let uc = SignIn {
        users: users.as_ref(),
        identity: identity.as_ref(),
        storage: storage.as_ref(),
    };
    let signed_in = uc
        .execute(&SignInRequest {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(SignInResponse {
        message: "signed in".into(),
        user: signed_in.user.into(),
        access_token: signed_in.tokens.access_token,
        id_token: signed_in.tokens.id_token,
        refresh_token: signed_in.tokens.refresh_token,
    }))
}

#[utoipa::path(post, path = "/auth/refresh", tag = "Auth", request_body = RefreshBody, security(()), responses(
    (status = 200, body = RefreshResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn refresh(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<RefreshBody>,
) -> ApiResult<Json<RefreshResponse>> {
    let identity = ctx.identity();
    let uc = RefreshToken {
        identity: identity.as_ref(),
    };
    let tokens = uc.execute(&body.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        id_token: tokens.id_token,
    }))
}

#[utoipa::path(get, path = "/auth/me", tag = "Auth", responses(
    (status = 200, body = UserBase),
    (status = 401, body = ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<UserBase>> {
    let users = ctx.user_repo();
    let identity = ctx.identity();
    let storage = ctx.image_storage();
    let uc = GetMe {
        users: users.as_ref(),
        identity: identity.as_ref(),
        storage: storage.as_ref(),
    };
    Ok(Json(uc.execute(&token).await?.into()))
}

#[utoipa::path(post, path = "/auth/signout", tag = "Auth", responses(
    (status = 200, body = MessageResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn sign_out(
    State(ctx): State<AppContext>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<MessageResponse>> {
    let identity = ctx.identity();
    let uc = SignOut {
        identity: identity.as_ref(),
    };
    uc.execute(&token).await?;
    Ok(MessageResponse::new("signed out"))
}

#[utoipa::path(get, path = "/auth/session", tag = "Auth", responses(
    (status = 200, body = SessionResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn session(
    State(ctx): State<AppContext>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<SessionResponse>> {
    let verifier = ctx.token_verifier();
    let uc = GetSession {
        verifier: verifier.as_ref(),
    };
    let claims = uc.execute(&token).await?;
    Ok(Json(SessionResponse {
        sub: claims.sub,
        email: claims.email,
        token_use: match claims.token_use {
            TokenUse::Id => "id".into(),
            TokenUse::Access => "access".into(),
        },
    }))
}
