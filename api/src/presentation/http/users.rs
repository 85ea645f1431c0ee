use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::users::{UserBaseDto, UserProfileDto};
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::use_cases::users::follow::{FollowUser, UnfollowUser};
use crate::application::use_cases::users::follow_stats::FollowStats;
use crate::application::use_cases::users::get_profile::GetProfile;
use crate::application::use_cases::users::update_profile::{UpdateProfile, UpdateProfileInput};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiResult, ErrorBody};
use crate::presentation::http::extract::{AuthUser, PathParam};
use crate::presentation::http::params::{FormData, required_uuid};
use crate::presentation::http::pets::PetResponse;
use crate::presentation::http::posts::PostResponse;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBase {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub icon_image_url: Option<String>,
}

impl From<UserBaseDto> for UserBase {
    fn from(u: UserBaseDto) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            bio: u.bio,
            icon_image_url: u.icon_image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub icon_image_url: Option<String>,
    pub posts: Vec<PostResponse>,
    pub pets: Vec<PetResponse>,
    pub follows_count: i64,
    pub follower_count: i64,
}

impl From<UserProfileDto> for UserProfileResponse {
    fn from(p: UserProfileDto) -> Self {
        Self {
            id: p.user.id,
            email: p.user.email,
            name: p.user.name,
            bio: p.user.bio,
            icon_image_url: p.user.icon_image_url,
            posts: p.posts.into_iter().map(Into::into).collect(),
            pets: p.pets.into_iter().map(Into::into).collect(),
            follows_count: p.follows_count,
            follower_count: p.follower_count,
        }
    }
}

/// Multipart fields accepted by `PUT /users/update`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateProfileMultipart {
    name: String,
    bio: String,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub message: String,
    pub image_key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowsCountResponse {
    pub followed_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowerCountResponse {
    pub follower_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowsUsersResponse {
    pub followed_users: Vec<UserBase>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowerUsersResponse {
    pub follower_users: Vec<UserBase>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/update", put(update_user))
        .route("/follow", post(follow))
        .route("/unfollow", delete(unfollow))
        .route("/follows_count", get(follows_count))
        .route("/follower_count", get(follower_count))
        .route("/follows_users", get(follows_users))
        .route("/follower_users", get(follower_users))
        .route("/:id", get(get_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, body = UserProfileResponse), (status = 404, body = ErrorBody)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<UserProfileResponse>> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let pets = ctx.pet_repo();
    let follows = ctx.follow_repo();
    let storage = ctx.image_storage();
    let uc = GetProfile {
        users: users.as_ref(),
        posts: posts.as_ref(),
        pets: pets.as_ref(),
        follows: follows.as_ref(),
        storage: storage.as_ref(),
    };
    let profile = uc.execute(id).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(put, path = "/users/update", tag = "Users",
    params(("id" = Uuid, Query, description = "User to update (must be the caller)")),
    request_body(content = UpdateProfileMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = UpdateProfileResponse), (status = 403, body = ErrorBody)))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
    form: FormData,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let target = required_uuid(&q, "id")?;
    let users = ctx.user_repo();
    let storage = ctx.image_storage();
    let uc = UpdateProfile {
        users: users.as_ref(),
        storage: storage.as_ref(),
    };
    let image_key = uc
        .execute(
            auth.user.id,
            target,
            UpdateProfileInput {
                name: form.text("name").to_string(),
                bio: form.text("bio").to_string(),
                image: form.image,
            },
        )
        .await?;
    Ok(Json(UpdateProfileResponse {
        message: "profile updated".into(),
        image_key,
    }))
}

#[utoipa::path(post, path = "/users/follow", tag = "Users",
    params(("toId" = Uuid, Query, description = "User to follow")),
    responses((status = 200, body = MessageResponse), (status = 404, body = ErrorBody)))]
pub async fn follow(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let to_id = required_uuid(&q, "toId")?;
    let users = ctx.user_repo();
    let follows = ctx.follow_repo();
    let uc = FollowUser {
        users: users.as_ref(),
        follows: follows.as_ref(),
    };
    uc.execute(auth.user.id, to_id).await?;
    Ok(MessageResponse::new("followed"))
}

#[utoipa::path(delete, path = "/users/unfollow", tag = "Users",
    params(("toId" = Uuid, Query, description = "User to unfollow")),
    responses((status = 200, body = MessageResponse), (status = 404, body = ErrorBody)))]
pub async fn unfollow(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let to_id = required_uuid(&q, "toId")?;
    let follows = ctx.follow_repo();
    let uc = UnfollowUser {
        follows: follows.as_ref(),
    };
    uc.execute(auth.user.id, to_id).await?;
    Ok(MessageResponse::new("unfollowed"))
}

fn stats(ctx: &AppContext) -> (Arc<dyn FollowRepository>, Arc<dyn ImageStorage>) {
    (ctx.follow_repo(), ctx.image_storage())
}

#[utoipa::path(get, path = "/users/follows_count", tag = "Users",
    params(("id" = Uuid, Query, description = "User id")),
    responses((status = 200, body = FollowsCountResponse)))]
pub async fn follows_count(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<FollowsCountResponse>> {
    let id = required_uuid(&q, "id")?;
    let (follows, storage) = stats(&ctx);
    let uc = FollowStats {
        follows: follows.as_ref(),
        storage: storage.as_ref(),
    };
    Ok(Json(FollowsCountResponse {
        followed_count: uc.follows_count(id).await?,
    }))
}

#[utoipa::path(get, path = "/users/follower_count", tag = "Users",
    params(("id" = Uuid, Query, description = "User id")),
    responses((status = 200, body = FollowerCountResponse)))]
pub async fn follower_count(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<FollowerCountResponse>> {
    let id = required_uuid(&q, "id")?;
    let (follows, storage) = stats(&ctx);
    let uc = FollowStats {
        follows: follows.as_ref(),
        storage: storage.as_ref(),
    };
    Ok(Json(FollowerCountResponse {
        follower_count: uc.follower_count(id).await?,
    }))
}

#[utoipa::path(get, path = "/users/follows_users", tag = "Users",
    params(("id" = Uuid, Query, description = "User id")),
    responses((status = 200, body = FollowsUsersResponse)))]
pub async fn follows_users(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<FollowsUsersResponse>> {
    let id = required_uuid(&q, "id")?;
    let (follows, storage) = stats(&ctx);
    let uc = FollowStats {
        follows: follows.as_ref(),
        storage: storage.as_ref(),
    };
    let users = uc.follows_users(id).await?;
    Ok(Json(FollowsUsersResponse {
        followed_users: users.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/users/follower_users", tag = "Users",
    params(("id" = Uuid, Query, description = "User id")),
    responses((status = 200, body = FollowerUsersResponse)))]
pub async fn follower_users(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<FollowerUsersResponse>> {
    let id = required_uuid(&q, "id")?;
    let (follows, storage) = stats(&ctx);
    let uc = FollowStats {
        follows: follows.as_ref(),
        storage: storage.as_ref(),
    };
    let users = uc.follower_users(id).await?;
    Ok(Json(FollowerUsersResponse {
        follower_users: users.into_iter().map(Into::into).collect(),
    }))
}
