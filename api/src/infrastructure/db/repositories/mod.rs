pub mod comment_repository_sqlx;
pub mod follow_repository_sqlx;
pub mod like_repository_sqlx;
pub mod pet_repository_sqlx;
pub mod post_repository_sqlx;
pub mod user_repository_sqlx;
