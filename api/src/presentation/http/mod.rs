pub mod auth;
pub mod comments;
pub mod error;
pub mod extract;
pub mod health;
pub mod params;
pub mod pets;
pub mod posts;
pub mod users;

use axum::{Router, routing::get};

use crate::bootstrap::app_context::AppContext;

/// Every route except `/health`, which needs the database pool directly.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(health::root))
        .nest("/auth", auth::routes(ctx.clone()))
        .nest("/users", users::routes(ctx.clone()))
        .nest("/posts", posts::routes(ctx.clone()))
        .nest("/comments", comments::routes(ctx.clone()))
        .nest("/pets", pets::routes(ctx))
        .fallback(error::not_found)
}
