//! In-memory port implementations for use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::identity_provider::{
    AuthTokens, IdentityError, IdentityProvider, RefreshedTokens,
};
use crate::application::ports::like_repository::LikeRepository;
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::{ImageStorage, ImageUpload};
use crate::application::ports::token_verifier::{TokenUse, TokenVerifier, VerifiedClaims};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::comments::comment::{Comment, CommentWithAuthor};
use crate::domain::follows::follow::FollowRelation;
use crate::domain::likes::like::Like;
use crate::domain::pets::pet::{Pet, PetAttributes};
use crate::domain::posts::post::{Post, PostWithAuthor};
use crate::domain::users::user::User;

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    pets: Vec<Pet>,
    follows: Vec<FollowRelation>,
    objects: HashMap<String, Vec<u8>>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing_updates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user(&self, name: &str, email: &str) -> User {
        UserRepository::create(self, name, email).await.unwrap()
    }

    pub async fn post(&self, author: &User, caption: &str) -> Post {
        let key = self.put_object(&format!("posts/{}.png", Uuid::new_v4()));
        PostRepository::create(self, author.id, caption, &key).await.unwrap()
    }

    pub async fn pet(&self, owner: &User, name: &str) -> Pet {
        let key = self.put_object(&format!("pets/{}.png", Uuid::new_v4()));
        let attrs = PetAttributes::parse(name, "dog", "shiba_inu", "2021-01-01").unwrap();
        PetRepository::create(self, owner.id, &attrs, &key).await.unwrap()
    }

    pub fn put_object(&self, key: &str) -> String {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(key.to_string(), b"img".to_vec());
        key.to_string()
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(key)
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    /// Makes profile and pet updates return an error from now on.
    pub fn fail_updates(&self) {
        self.failing_updates.store(true, Ordering::SeqCst);
    }

    fn check_update(&self) -> anyhow::Result<()> {
        if self.failing_updates.load(Ordering::SeqCst) {
            anyhow::bail!("store unavailable");
        }
        Ok(())
    }

    pub fn raw_post(&self, id: Uuid) -> Option<Post> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn with_author(state: &State, post: &Post) -> PostWithAuthor {
        let author = state
            .users
            .iter()
            .find(|u| u.id == post.user_id)
            .cloned()
            .unwrap();
        PostWithAuthor {
            post: post.clone(),
            author,
            likes_count: state.likes.iter().filter(|l| l.post_id == post.id).count() as i64,
            comments_count: state
                .comments
                .iter()
                .filter(|c| c.post_id == post.id)
                .count() as i64,
        }
    }
}

pub fn upload(name: &str) -> ImageUpload {
    ImageUpload {
        filename: Some(name.to_string()),
        content_type: Some("image/png".to_string()),
        bytes: b"\x89PNG".to_vec(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, name: &str, email: &str) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            bio: String::new(),
            icon_image_key: None,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn exists_email(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.state.lock().unwrap().users.iter().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        bio: &str,
        icon_image_key: Option<&str>,
    ) -> anyhow::Result<bool> {
        self.check_update()?;
        let mut st = self.state.lock().unwrap();
        let Some(u) = st.users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        u.name = name.to_string();
        u.bio = bio.to_string();
        u.icon_image_key = icon_image_key.map(str::to_string);
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_all(&self) -> anyhow::Result<Vec<PostWithAuthor>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<_> = st
            .posts
            .iter()
            .filter(|p| !p.is_deleted())
            .map(|p| Self::with_author(&st, p))
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<PostWithAuthor>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<_> = st
            .posts
            .iter()
            .filter(|p| !p.is_deleted() && p.user_id == user_id)
            .map(|p| Self::with_author(&st, p))
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .posts
            .iter()
            .find(|p| p.id == id && !p.is_deleted())
            .cloned())
    }

    async fn create(&self, user_id: Uuid, caption: &str, image_key: &str) -> anyhow::Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            caption: caption.to_string(),
            image_key: image_key.to_string(),
            user_id,
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.state.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn update_caption(&self, id: Uuid, caption: &str) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st.posts.iter_mut().find(|p| p.id == id && !p.is_deleted()) {
            Some(p) => {
                p.caption = caption.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st.posts.iter_mut().find(|p| p.id == id && !p.is_deleted()) {
            Some(p) => {
                p.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> anyhow::Result<Comment> {
        let c = Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().comments.push(c.clone());
        Ok(c)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let st = self.state.lock().unwrap();
        Ok(st.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.comments.len();
        st.comments.retain(|c| c.id != id);
        Ok(st.comments.len() != before)
    }

    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<CommentWithAuthor>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                author: st.users.iter().find(|u| u.id == c.user_id).cloned().unwrap(),
            })
            .collect())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn like(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if st
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.post_id == post_id)
        {
            return Ok(false);
        }
        st.likes.push(Like {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.likes.len();
        st.likes
            .retain(|l| !(l.user_id == user_id && l.post_id == post_id));
        Ok(st.likes.len() != before)
    }

    async fn count_for_post(&self, post_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.likes.iter().filter(|l| l.post_id == post_id).count() as i64)
    }

    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> anyhow::Result<bool> {
        let st = self.state.lock().unwrap();
        Ok(st
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.post_id == post_id))
    }
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Pet>> {
        let st = self.state.lock().unwrap();
        Ok(st.pets.iter().filter(|p| p.owner_id == owner_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>> {
        let st = self.state.lock().unwrap();
        Ok(st.pets.iter().find(|p| p.id == id).cloned())
    }

    async fn create(
        &self,
        owner_id: Uuid,
        attrs: &PetAttributes,
        image_key: &str,
    ) -> anyhow::Result<Pet> {
        let pet = Pet {
            id: Uuid::new_v4(),
            name: attrs.name.clone(),
            birth_day: attrs.birth_day.clone(),
            pet_type: attrs.pet_type,
            species: attrs.species.clone(),
            image_key: image_key.to_string(),
            owner_id,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().pets.push(pet.clone());
        Ok(pet)
    }

    async fn update(
        &self,
        id: Uuid,
        attrs: &PetAttributes,
        image_key: Option<&str>,
    ) -> anyhow::Result<Option<Pet>> {
        self.check_update()?;
        let mut st = self.state.lock().unwrap();
        let Some(p) = st.pets.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        p.name = attrs.name.clone();
        p.pet_type = attrs.pet_type;
        p.species = attrs.species.clone();
        p.birth_day = attrs.birth_day.clone();
        if let Some(k) = image_key {
            p.image_key = k.to_string();
        }
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.pets.len();
        st.pets.retain(|p| p.id != id);
        Ok(st.pets.len() != before)
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn follow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if st
            .follows
            .iter()
            .any(|f| f.from_id == from_id && f.to_id == to_id)
        {
            return Ok(false);
        }
        st.follows.push(FollowRelation {
            id: Uuid::new_v4(),
            from_id,
            to_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn unfollow(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.follows.len();
        st.follows
            .retain(|f| !(f.from_id == from_id && f.to_id == to_id));
        Ok(st.follows.len() != before)
    }

    async fn is_following(&self, from_id: Uuid, to_id: Uuid) -> anyhow::Result<bool> {
        let st = self.state.lock().unwrap();
        Ok(st
            .follows
            .iter()
            .any(|f| f.from_id == from_id && f.to_id == to_id))
    }

    async fn count_follows(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.follows.iter().filter(|f| f.from_id == user_id).count() as i64)
    }

    async fn count_followers(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.follows.iter().filter(|f| f.to_id == user_id).count() as i64)
    }

    async fn list_follows(&self, user_id: Uuid) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .follows
            .iter()
            .filter(|f| f.from_id == user_id)
            .filter_map(|f| st.users.iter().find(|u| u.id == f.to_id).cloned())
            .collect())
    }

    async fn list_followers(&self, user_id: Uuid) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .follows
            .iter()
            .filter(|f| f.to_id == user_id)
            .filter_map(|f| st.users.iter().find(|u| u.id == f.from_id).cloned())
            .collect())
    }
}

#[async_trait]
impl ImageStorage for MemoryStore {
    async fn upload_image(
        &self,
        directory: &str,
        original_filename: Option<&str>,
        _content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        let key = format!(
            "{directory}/{}-{}",
            Uuid::new_v4(),
            original_filename.unwrap_or("image")
        );
        self.state.lock().unwrap().objects.insert(key.clone(), bytes);
        Ok(key)
    }

    async fn presigned_url(&self, key: &str) -> anyhow::Result<String> {
        Ok(format!("https://signed.test/{key}"))
    }

    async fn delete_image(&self, key: &str) -> anyhow::Result<()> {
        self.state.lock().unwrap().objects.remove(key);
        Ok(())
    }
}

/// Identity provider double: accounts keyed by email, confirmation code `123456`.
#[derive(Default)]
pub struct FakeIdentity {
    // email -> (password, confirmed)
    accounts: Mutex<HashMap<String, (String, bool)>>,
    signed_out: Mutex<Vec<String>>,
}

pub const CONFIRMATION_CODE: &str = "123456";

impl FakeIdentity {
    pub fn with_confirmed(email: &str, password: &str) -> Self {
        let me = Self::default();
        me.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), true));
        me
    }

    pub fn is_confirmed(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .unwrap()
            .get(email)
            .map(|(_, c)| *c)
            .unwrap_or(false)
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }

    fn rejected(code: &str, message: &str) -> IdentityError {
        IdentityError::Rejected {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, _name: &str, email: &str, password: &str) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(Self::rejected("UsernameExistsException", "User already exists"));
        }
        if password.len() < 8 {
            return Err(Self::rejected("InvalidPasswordException", "Password too short"));
        }
        accounts.insert(email.to_string(), (password.to_string(), false));
        Ok(())
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(email) {
            Some(acc) if code == CONFIRMATION_CODE => {
                acc.1 = true;
                Ok(())
            }
            _ => Err(Self::rejected("CodeMismatchException", "Invalid code")),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((pw, true)) if pw == password => Ok(AuthTokens {
                access_token: format!("access:{email}"),
                id_token: format!("id:{email}"),
                refresh_token: format!("refresh:{email}"),
            }),
            _ => Err(Self::rejected(
                "NotAuthorizedException",
                "Incorrect username or password.",
            )),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, IdentityError> {
        match refresh_token.strip_prefix("refresh:") {
            Some(email) => Ok(RefreshedTokens {
                access_token: format!("access:{email}"),
                id_token: format!("id:{email}"),
            }),
            None => Err(Self::rejected("NotAuthorizedException", "Invalid Refresh Token")),
        }
    }

    async fn get_user_email(&self, access_token: &str) -> Result<String, IdentityError> {
        access_token
            .strip_prefix("access:")
            .map(str::to_string)
            .ok_or_else(|| Self::rejected("NotAuthorizedException", "Invalid Access Token"))
    }

    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.get_user_email(access_token).await?;
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }
}

/// Accepts the `id:{email}` and `access:{email}` tokens minted by [`FakeIdentity`].
#[derive(Default)]
pub struct FakeVerifier;

#[async_trait]
impl TokenVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> anyhow::Result<VerifiedClaims> {
        if let Some(email) = token.strip_prefix("id:") {
            return Ok(VerifiedClaims {
                sub: format!("sub-{email}"),
                email: Some(email.to_string()),
                token_use: TokenUse::Id,
            });
        }
        if let Some(email) = token.strip_prefix("access:") {
            return Ok(VerifiedClaims {
                sub: format!("sub-{email}"),
                email: None,
                token_use: TokenUse::Access,
            });
        }
        anyhow::bail!("signature mismatch")
    }
}
