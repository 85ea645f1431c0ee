use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use aws_config::{BehaviorVersion, Region};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use animalia_api::bootstrap::app_context::{AppContext, AppServices};
use animalia_api::bootstrap::config::Config;
use animalia_api::infrastructure::db::repositories::{
    comment_repository_sqlx::SqlxCommentRepository, follow_repository_sqlx::SqlxFollowRepository,
    like_repository_sqlx::SqlxLikeRepository, pet_repository_sqlx::SqlxPetRepository,
    post_repository_sqlx::SqlxPostRepository, user_repository_sqlx::SqlxUserRepository,
};
use animalia_api::infrastructure::db::seed::{SeedTargets, seed_sample_data};
use animalia_api::infrastructure::identity::{
    cognito::CognitoIdentityProvider, jwks::JwksVerifier,
};
use animalia_api::infrastructure::storage::s3_image_storage::S3ImageStorage;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            animalia_api::presentation::http::health::root,
            animalia_api::presentation::http::health::health,
            animalia_api::presentation::http::auth::sign_up,
            animalia_api::presentation::http::auth::verify_email,
            animalia_api::presentation::http::auth::sign_in,
            animalia_api::presentation::http::auth::refresh,
            animalia_api::presentation::http::auth::me,
            animalia_api::presentation::http::auth::sign_out,
            animalia_api::presentation::http::auth::session,
            animalia_api::presentation::http::users::get_user,
            animalia_api::presentation::http::users::update_user,
            animalia_api::presentation::http::users::follow,
            animalia_api::presentation::http::users::unfollow,
            animalia_api::presentation::http::users::follows_count,
            animalia_api::presentation::http::users::follower_count,
            animalia_api::presentation::http::users::follows_users,
            animalia_api::presentation::http::users::follower_users,
            animalia_api::presentation::http::posts::list_posts,
            animalia_api::presentation::http::posts::create_post,
            animalia_api::presentation::http::posts::list_user_posts,
            animalia_api::presentation::http::posts::update_post,
            animalia_api::presentation::http::posts::delete_post,
            animalia_api::presentation::http::posts::like_post,
            animalia_api::presentation::http::posts::unlike_post,
            animalia_api::presentation::http::posts::likes_count,
            animalia_api::presentation::http::comments::create_comment,
            animalia_api::presentation::http::comments::delete_comment,
            animalia_api::presentation::http::comments::list_comments,
            animalia_api::presentation::http::comments::count_comments,
            animalia_api::presentation::http::pets::list_owner_pets,
            animalia_api::presentation::http::pets::create_pet,
            animalia_api::presentation::http::pets::update_pet,
            animalia_api::presentation::http::pets::delete_pet,
        ),
        components(schemas(
            animalia_api::presentation::http::error::ErrorBody,
            animalia_api::presentation::http::health::HealthResp,
            animalia_api::presentation::http::auth::SignUpBody,
            animalia_api::presentation::http::auth::SignUpResponse,
            animalia_api::presentation::http::auth::VerifyEmailBody,
            animalia_api::presentation::http::auth::SignInBody,
            animalia_api::presentation::http::auth::SignInResponse,
            animalia_api::presentation::http::auth::RefreshBody,
            animalia_api::presentation::http::auth::RefreshResponse,
            animalia_api::presentation::http::auth::SessionResponse,
            animalia_api::presentation::http::users::UserBase,
            animalia_api::presentation::http::users::UserProfileResponse,
            animalia_api::presentation::http::users::UpdateProfileMultipart,
            animalia_api::presentation::http::users::UpdateProfileResponse,
            animalia_api::presentation::http::users::MessageResponse,
            animalia_api::presentation::http::users::FollowsCountResponse,
            animalia_api::presentation::http::users::FollowerCountResponse,
            animalia_api::presentation::http::users::FollowsUsersResponse,
            animalia_api::presentation::http::users::FollowerUsersResponse,
            animalia_api::presentation::http::posts::PostResponse,
            animalia_api::presentation::http::posts::PostsResponse,
            animalia_api::presentation::http::posts::CreatePostMultipart,
            animalia_api::presentation::http::posts::CreatePostResponse,
            animalia_api::presentation::http::posts::UpdatePostBody,
            animalia_api::presentation::http::posts::CountResponse,
            animalia_api::presentation::http::comments::CommentBody,
            animalia_api::presentation::http::comments::CommentResponse,
            animalia_api::presentation::http::comments::CommentsResponse,
            animalia_api::presentation::http::comments::CreateCommentResponse,
            animalia_api::presentation::http::pets::PetResponse,
            animalia_api::presentation::http::pets::PetsResponse,
            animalia_api::presentation::http::pets::PetMultipart,
            animalia_api::presentation::http::pets::PetMutationResponse,
            animalia_api::domain::pets::pet::PetType,
        )),
        tags(
            (name = "Auth", description = "Sign-up, sign-in and sessions"),
            (name = "Users", description = "Profiles and follow relations"),
            (name = "Posts", description = "Photo posts and likes"),
            (name = "Comments", description = "Comments on posts"),
            (name = "Pets", description = "Pet profiles"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = Config::from_env()?;

    let default_filter = if cfg.is_production {
        "animalia_api=info,axum=info,tower_http=info"
    } else {
        "animalia_api=debug,axum=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()))
        .init();

    info!(
        port = cfg.api_port,
        production = cfg.is_production,
        bucket = %cfg.s3_bucket,
        "Starting Animalia backend"
    );

    // Database
    let pool = animalia_api::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.database_max_connections,
    )
    .await?;
    animalia_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let post_repo = Arc::new(SqlxPostRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqlxCommentRepository::new(pool.clone()));
    let like_repo = Arc::new(SqlxLikeRepository::new(pool.clone()));
    let pet_repo = Arc::new(SqlxPetRepository::new(pool.clone()));
    let follow_repo = Arc::new(SqlxFollowRepository::new(pool.clone()));

    if cfg.seed {
        let report = seed_sample_data(&SeedTargets {
            users: user_repo.as_ref(),
            follows: follow_repo.as_ref(),
            pets: pet_repo.as_ref(),
            posts: post_repo.as_ref(),
            comments: comment_repo.as_ref(),
            likes: like_repo.as_ref(),
        })
        .await?;
        info!(?report, "seed_complete");
    }

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(cfg.aws_region.clone()))
        .load()
        .await;

    let services = AppServices::new(
        user_repo,
        post_repo,
        comment_repo,
        like_repo,
        pet_repo,
        follow_repo,
        Arc::new(S3ImageStorage::new(&aws, &cfg).await?),
        Arc::new(CognitoIdentityProvider::new(&aws, &cfg)),
        Arc::new(JwksVerifier::new(&cfg)),
    );

    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(600)),
        Some(Err(_)) | None if cfg.is_production => {
            // FRONTEND_URL is required in production; an unparsable one denies all.
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
                .allow_methods(methods)
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        }
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(600)),
    };

    let app = Router::new()
        .merge(animalia_api::presentation::http::health::routes(pool.clone()))
        .merge(animalia_api::presentation::http::router(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        // Multipart bodies carry the image plus a little form overhead.
        .layer(DefaultBodyLimit::max(cfg.upload_max_bytes + 64 * 1024))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed_to_listen_for_shutdown");
    }
}
