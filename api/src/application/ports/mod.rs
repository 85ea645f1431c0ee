pub mod comment_repository;
pub mod follow_repository;
pub mod identity_provider;
pub mod like_repository;
pub mod pet_repository;
pub mod post_repository;
pub mod storage_port;
pub mod token_verifier;
pub mod user_repository;
