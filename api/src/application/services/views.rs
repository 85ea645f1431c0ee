//! Turns stored rows into client-facing DTOs, swapping object keys for
//! presigned URLs.

use crate::application::dto::comments::CommentDto;
use crate::application::dto::pets::PetDto;
use crate::application::dto::posts::PostDto;
use crate::application::dto::users::UserBaseDto;
use crate::application::ports::storage_port::ImageStorage;
use crate::domain::comments::comment::CommentWithAuthor;
use crate::domain::pets::pet::Pet;
use crate::domain::posts::post::PostWithAuthor;
use crate::domain::users::user::User;

pub async fn optional_url<S: ImageStorage + ?Sized>(
    storage: &S,
    key: Option<&str>,
) -> anyhow::Result<Option<String>> {
    match key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(k) => Ok(Some(storage.presigned_url(k).await?)),
        None => Ok(None),
    }
}

pub async fn user_base<S: ImageStorage + ?Sized>(
    storage: &S,
    user: User,
) -> anyhow::Result<UserBaseDto> {
    let icon_image_url = optional_url(storage, user.icon_image_key.as_deref()).await?;
    Ok(UserBaseDto {
        id: user.id,
        email: user.email,
        name: user.name,
        bio: user.bio,
        icon_image_url,
    })
}

pub async fn users<S: ImageStorage + ?Sized>(
    storage: &S,
    rows: Vec<User>,
) -> anyhow::Result<Vec<UserBaseDto>> {
    let mut out = Vec::with_capacity(rows.len());
    for u in rows {
        out.push(user_base(storage, u).await?);
    }
    Ok(out)
}

pub async fn post<S: ImageStorage + ?Sized>(
    storage: &S,
    row: PostWithAuthor,
) -> anyhow::Result<PostDto> {
    let image_url = storage.presigned_url(&row.post.image_key).await?;
    let author = user_base(storage, row.author).await?;
    Ok(PostDto {
        id: row.post.id,
        caption: row.post.caption,
        image_url,
        created_at: row.post.created_at,
        likes_count: row.likes_count,
        comments_count: row.comments_count,
        author,
    })
}

pub async fn posts<S: ImageStorage + ?Sized>(
    storage: &S,
    rows: Vec<PostWithAuthor>,
) -> anyhow::Result<Vec<PostDto>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let post_id = row.post.id;
        let dto = post(storage, row).await.map_err(|err| {
            tracing::error!(error = ?err, post_id = %post_id, "post_view_failed");
            err
        })?;
        out.push(dto);
    }
    Ok(out)
}

pub async fn comment<S: ImageStorage + ?Sized>(
    storage: &S,
    row: CommentWithAuthor,
) -> anyhow::Result<CommentDto> {
    let author = user_base(storage, row.author).await?;
    Ok(CommentDto {
        id: row.comment.id,
        content: row.comment.content,
        post_id: row.comment.post_id,
        created_at: row.comment.created_at,
        author,
    })
}

pub async fn pet<S: ImageStorage + ?Sized>(storage: &S, pet: Pet) -> anyhow::Result<PetDto> {
    let image_url = storage.presigned_url(&pet.image_key).await?;
    Ok(PetDto {
        id: pet.id,
        name: pet.name,
        birth_day: pet.birth_day,
        pet_type: pet.pet_type,
        species: pet.species,
        image_url,
        owner_id: pet.owner_id,
        created_at: pet.created_at,
    })
}

pub async fn pets<S: ImageStorage + ?Sized>(
    storage: &S,
    rows: Vec<Pet>,
) -> anyhow::Result<Vec<PetDto>> {
    let mut out = Vec::with_capacity(rows.len());
    for p in rows {
        out.push(pet(storage, p).await?);
    }
    Ok(out)
}
