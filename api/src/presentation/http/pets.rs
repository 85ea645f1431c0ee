use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::pets::PetDto;
use crate::application::use_cases::pets::create_pet::{CreatePet, PetForm};
use crate::application::use_cases::pets::delete_pet::DeletePet;
use crate::application::use_cases::pets::list_pets::ListPets;
use crate::application::use_cases::pets::update_pet::UpdatePet;
use crate::bootstrap::app_context::AppContext;
use crate::domain::pets::pet::PetType;
use crate::presentation::http::error::{ApiResult, ErrorBody};
use crate::presentation::http::extract::AuthUser;
use crate::presentation::http::params::{FormData, required_uuid};
use crate::presentation::http::users::MessageResponse;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: Uuid,
    pub name: String,
    pub birth_day: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub species: String,
    pub image_url: String,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PetDto> for PetResponse {
    fn from(p: PetDto) -> Self {
        Self {
            id: p.id,
            name: p.name,
            birth_day: p.birth_day,
            pet_type: p.pet_type,
            species: p.species,
            image_url: p.image_url,
            owner_id: p.owner_id,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PetsResponse {
    pub pets: Vec<PetResponse>,
}

/// Multipart fields accepted by `POST /pets/new` and `PUT /pets/update`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PetMultipart {
    name: String,
    #[serde(rename = "type")]
    pet_type: PetType,
    species: String,
    birth_day: String,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PetMutationResponse {
    pub message: String,
    pub pet: PetResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/owner", get(list_owner_pets))
        .route("/new", post(create_pet))
        .route("/update", put(update_pet))
        .route("/delete", delete(delete_pet))
        .with_state(ctx)
}

fn pet_form(form: &FormData) -> PetForm {
    PetForm {
        name: form.text("name").to_string(),
        pet_type: form.text("type").to_string(),
        species: form.text("species").to_string(),
        birth_day: form.text("birthDay").to_string(),
    }
}

#[utoipa::path(get, path = "/pets/owner", tag = "Pets",
    params(("ownerId" = Uuid, Query, description = "Owner id")),
    responses((status = 200, body = PetsResponse), (status = 400, body = ErrorBody)))]
pub async fn list_owner_pets(
    State(ctx): State<AppContext>,
    _auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<PetsResponse>> {
    let owner_id = required_uuid(&q, "ownerId")?;
    let pets = ctx.pet_repo();
    let storage = ctx.image_storage();
    let uc = ListPets {
        pets: pets.as_ref(),
        storage: storage.as_ref(),
    };
    let items = uc.execute(owner_id).await?;
    Ok(Json(PetsResponse {
        pets: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/pets/new", tag = "Pets",
    request_body(content = PetMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = PetMutationResponse), (status = 400, body = ErrorBody)))]
pub async fn create_pet(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    form: FormData,
) -> ApiResult<Json<PetMutationResponse>> {
    let pets = ctx.pet_repo();
    let storage = ctx.image_storage();
    let uc = CreatePet {
        pets: pets.as_ref(),
        storage: storage.as_ref(),
    };
    let fields = pet_form(&form);
    let pet = uc.execute(auth.user.id, &fields, form.image).await?;
    tracing::info!(pet_id = %pet.id, owner_id = %auth.user.id, "pet_created");
    Ok(Json(PetMutationResponse {
        message: "pet created".into(),
        pet: pet.into(),
    }))
}

#[utoipa::path(put, path = "/pets/update", tag = "Pets",
    params(("petId" = Uuid, Query, description = "Pet id")),
    request_body(content = PetMultipart, content_type = "multipart/form-data", description = "image is optional on update"),
    responses((status = 200, body = PetMutationResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_pet(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
    form: FormData,
) -> ApiResult<Json<PetMutationResponse>> {
    let pet_id = required_uuid(&q, "petId")?;
    let pets = ctx.pet_repo();
    let storage = ctx.image_storage();
    let uc = UpdatePet {
        pets: pets.as_ref(),
        storage: storage.as_ref(),
    };
    let fields = pet_form(&form);
    let pet = uc.execute(auth.user.id, pet_id, &fields, form.image).await?;
    Ok(Json(PetMutationResponse {
        message: "pet updated".into(),
        pet: pet.into(),
    }))
}

#[utoipa::path(delete, path = "/pets/delete", tag = "Pets",
    params(("petId" = Uuid, Query, description = "Pet id")),
    responses((status = 200, body = MessageResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_pet(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(q): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let pet_id = required_uuid(&q, "petId")?;
    let pets = ctx.pet_repo();
    let storage = ctx.image_storage();
    let uc = DeletePet {
        pets: pets.as_ref(),
        storage: storage.as_ref(),
    };
    uc.execute(auth.user.id, pet_id).await?;
    Ok(MessageResponse::new("pet deleted"))
}
