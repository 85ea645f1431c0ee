use std::collections::HashMap;

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::comments::CommentDto;
use crate::application::error::AppResult;
use crate::application::services::views;
use crate::application::use_cases::comments::create_comment::CreateComment;
use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::list_comments::ListComments;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiResult, ErrorBody};
use crate::presentation::http::extract::AuthUser;
use crate::presentation::http::params::required_uuid;
use crate::presentation::http::posts::CountResponse;
use crate::presentation::http::users::{MessageResponse, UserBase};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: UserBase,
}

impl From<CommentDto> for CommentResponse {
    fn from(c: CommentDto) -> Self {
        Self {
            id: c.id,
            content: c.content,
            post_id: c.post_id,
            created_at: c.created_at,
            user: c.author.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCommentResponse {
    pub message: String,
    pub comment: CommentResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/new", post(create_comment))
        .route("/delete", delete(delete_comment))
        .route("/post", get(list_comments))
        .route("/count", get(count_comments))
        .with_state(ctx)
}

/// Accepts `content` from a JSON body or a urlencoded form.
async fn read_content(req: Request) -> AppResult<String> {
    let is_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);
    let body = if is_json {
        Json::<CommentBody>::from_request(req, &())
            .await
            .map(|Json(b)| b)?
    } else {
        Form::<CommentBody>::from_request(req, &())
            .await
            .map(|Form(b)| b)?
    };
    Ok(body.content)
}

#[utoipa::path(post, path = "/comments/new", tag = "Comments",
    params(("postId" = Uuid, Query, description = "Post id")),
    request_body = CommentBody,
    responses((status = 200, body = CreateCommentResponse), (status = 400, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn create_comment(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
    req: Request,
) -> ApiResult<Json<CreateCommentResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let content = read_content(req).await?;
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let uc = CreateComment {
        posts: posts.as_ref(),
        comments: comments.as_ref(),
    };
    let comment = uc.execute(auth.user.id, post_id, &content).await?;
    let storage = ctx.image_storage();
    let author = views::user_base(storage.as_ref(), auth.user).await?;
    Ok(Json(CreateCommentResponse {
        message: "comment created".into(),
        comment: CommentResponse {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            created_at: comment.created_at,
            user: author.into(),
        },
    }))
}

#[utoipa::path(delete, path = "/comments/delete", tag = "Comments",
    params(("commentId" = Uuid, Query, description = "Comment id")),
    responses((status = 200, body = MessageResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let comment_id = required_uuid(&q, "commentId")?;
    let comments = ctx.comment_repo();
    let uc = DeleteComment {
        comments: comments.as_ref(),
    };
    uc.execute(auth.user.id, comment_id).await?;
    Ok(MessageResponse::new("comment deleted"))
}

#[utoipa::path(get, path = "/comments/post", tag = "Comments",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = CommentsResponse), (status = 404, body = ErrorBody)))]
pub async fn list_comments(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<CommentsResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let storage = ctx.image_storage();
    let uc = ListComments {
        posts: posts.as_ref(),
        comments: comments.as_ref(),
        storage: storage.as_ref(),
    };
    let items = uc.execute(post_id).await?;
    Ok(Json(CommentsResponse {
        comments: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/comments/count", tag = "Comments",
    params(("postId" = Uuid, Query, description = "Post id")),
    responses((status = 200, body = CountResponse), (status = 404, body = ErrorBody)))]
pub async fn count_comments(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<CountResponse>> {
    let post_id = required_uuid(&q, "postId")?;
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let storage = ctx.image_storage();
    let uc = ListComments {
        posts: posts.as_ref(),
        comments: comments.as_ref(),
        storage: storage.as_ref(),
    };
    Ok(Json(CountResponse {
        count: uc.count(post_id).await?,
    }))
}
