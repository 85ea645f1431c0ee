pub mod comments;
pub mod pets;
pub mod posts;
pub mod users;
