//! Query-string and multipart helpers shared by the route modules.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::storage_port::ImageUpload;
use crate::bootstrap::app_context::AppContext;

/// Parses a required UUID query parameter, naming it in the 400 message.
pub fn required_uuid(params: &HashMap<String, String>, name: &str) -> AppResult<Uuid> {
    let raw = params
        .get(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("{name} is not a valid id")))
}

/// Text fields plus the optional `image` file of a multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart, max_bytes: usize) -> AppResult<Self> {
        let mut form = FormData::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| AppError::Validation("invalid multipart body".into()))?
        {
            let Some(name) = field.name().map(|s| s.to_string()) else {
                continue;
            };
            if name == "image" {
                let filename = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("invalid image upload".into()))?;
                if bytes.len() > max_bytes {
                    return Err(AppError::Validation("image is too large".into()));
                }
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation(format!("invalid field {name}")))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

#[axum::async_trait]
impl FromRequest<AppContext> for FormData {
    type Rejection = AppError;

    async fn from_request(req: Request, ctx: &AppContext) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, ctx).await?;
        FormData::read(multipart, ctx.cfg.upload_max_bytes).await
    }
}
