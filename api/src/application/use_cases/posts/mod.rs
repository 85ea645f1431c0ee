pub mod create_post;
pub mod delete_post;
pub mod likes;
pub mod list_posts;
pub mod update_post;
