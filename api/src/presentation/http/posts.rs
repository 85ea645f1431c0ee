use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::posts::PostDto;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::delete_post::DeletePost;
use crate::application::use_cases::posts::likes::LikePost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::application::use_cases::posts::update_post::UpdatePost;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiResult, ErrorBody};
use crate::presentation::http::extract::{AuthUser, JsonBody};
use crate::presentation::http::params::{FormData, required_uuid};
use crate::presentation::http::users::{MessageResponse, UserBase};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub caption: String,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub user: UserBase,
}

impl From<PostDto> for PostResponse {
    fn from(p: PostDto) -> Self {
        Self {
            id: p.id,
            caption: p.caption,
            image_url: p.image_url,
            created_at: p.created_at,
            likes_count: p.likes_count,
            comments_count: p.comments_count,
            user: p.author.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostResponse,
}

/// Multipart fields accepted by `POST /posts`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreatePostMultipart {
    caption: String,
    #[schema(value_type = String, format = Binary)]
    image: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostBody {
    pub caption: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/user", get(list_user_posts))
        .route("/update", put(update_post))
        .route("/delete", delete(delete_post))
        .route("/like", post(like_post))
        .route("/unlike", delete(unlike_post))
        .route("/likes_count", get(likes_count))
        .with_state(ctx)
}

async fn list(ctx: &AppContext, author: Option<Uuid>) -> ApiResult<Json<PostsResponse>> {
    let posts = ctx.post_repo();
    let storage = ctx.image_storage();
    let uc = ListPosts {
        posts: posts.as_ref(),
        storage: storage.as_ref(),
    };
    let items = uc.execute(author).await?;
    Ok(Json(PostsResponse {
        posts: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/posts", tag = "Posts", responses(
    (status = 200, body = PostsResponse)
))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
) -> ApiResult<Json<PostsResponse>> {
    list(&ctx, None).await
}

#[utoipa::path(get, path = "/posts/user", tag = "Posts",
    params(("userId" = Uuid, Query, description = "Author id")),
    responses((status = 200, body = PostsResponse), (status = 400, body = ErrorBody)))]
pub async fn list_user_posts(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<PostsResponse>> {
    let user_id = required_uuid(&q, "userId")?;
    list(&ctx, Some(user_id)).await
}

#[utoipa::path(post, path = "/posts", tag = "Posts",
    request_body(content = CreatePostMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = CreatePostResponse), (status = 400, body = ErrorBody)))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    form: FormData,
) -> ApiResult<Json<CreatePostResponse>> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let storage = ctx.image_storage();
    let uc = CreatePost {
        users: users.as_ref(),
        posts: posts.as_ref(),
        storage: storage.as_ref(),
    };
    let caption = form.text("caption").to_string();
    let post = uc.execute(auth.user.id, &caption, form.image).await?;
    tracing::info!(post_id = %post.id, user_id = %auth.user.id, "post_created");
    Ok(Json(CreatePostResponse {
        message: "post created".into(),
        post: post.into(),
    }))
}

#[utoipa::path(put, path = "/posts/update", tag = "Posts",
    params(("postId" = Uuid, Query, description = "Post id")),
    request_body = UpdatePostBody,
    responses((status = 200, body = MessageResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_post(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
    JsonBody(body): JsonBody<UpdatePostBody>,
) -> ApiResult<Json<MessageResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let uc = UpdatePost {
        posts: posts.as_ref(),
    };
    uc.execute(auth.user.id, post_id, &body.caption).await?;
    Ok(MessageResponse::new("post updated"))
}

#[utoipa::path(delete, path = "/posts/delete", tag = "Posts",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = MessageResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_post(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let uc = DeletePost {
        posts: posts.as_ref(),
    };
    uc.execute(auth.user.id, post_id).await?;
    Ok(MessageResponse::new("post deleted"))
}

#[utoipa::path(post, path = "/posts/like", tag = "Posts",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = MessageResponse), (status = 404, body = ErrorBody)))]
pub async fn like_post(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let likes = ctx.like_repo();
    let uc = LikePost {
        posts: posts.as_ref(),
        likes: likes.as_ref(),
    };
    uc.like(auth.user.id, post_id).await?;
    Ok(MessageResponse::new("post liked"))
}

#[utoipa::path(delete, path = "/posts/unlike", tag = "Posts",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = MessageResponse), (status = 404, body = ErrorBody)))]
pub async fn unlike_post(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let likes = ctx.like_repo();
    let uc = LikePost {
        posts: posts.as_ref(),
        likes: likes.as_ref(),
    };
    uc.unlike(auth.user.id, post_id).await?;
    Ok(MessageResponse::new("post unliked"))
}

#[utoipa::path(get, path = "/posts/likes_count", tag = "Posts",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = CountResponse), (status = 404, body = ErrorBody)))]
pub async fn likes_count(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<CountResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let likes = ctx.like_repo();
    let uc = LikePost {
        posts: posts.as_ref(),
        likes: likes.as_ref(),
    };
    Ok(Json(CountResponse {
        count: uc.count(post_id).await?,
    }))
}
