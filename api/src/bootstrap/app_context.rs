use std::sync::Arc;

use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::identity_provider::IdentityProvider;
use crate::application::ports::like_repository::LikeRepository;
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::ImageStorage;
use crate::application::ports::token_verifier::TokenVerifier;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    pet_repo: Arc<dyn PetRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    image_storage: Arc<dyn ImageStorage>,
    identity: Arc<dyn IdentityProvider>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        like_repo: Arc<dyn LikeRepository>,
        pet_repo: Arc<dyn PetRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        image_storage: Arc<dyn ImageStorage>,
        identity: Arc<dyn IdentityProvider>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            like_repo,
            pet_repo,
            follow_repo,
            image_storage,
            identity,
            token_verifier,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn post_repo(&self) -> Arc<dyn PostRepository> {
        self.services.post_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn like_repo(&self) -> Arc<dyn LikeRepository> {
        self.services.like_repo.clone()
    }

    pub fn pet_repo(&self) -> Arc<dyn PetRepository> {
        self.services.pet_repo.clone()
    }

    pub fn follow_repo(&self) -> Arc<dyn FollowRepository> {
        self.services.follow_repo.clone()
    }

    pub fn image_storage(&self) -> Arc<dyn ImageStorage> {
        self.services.image_storage.clone()
    }

    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.services.identity.clone()
    }

    pub fn token_verifier(&self) -> Arc<dyn TokenVerifier> {
        self.services.token_verifier.clone()
    }
}
