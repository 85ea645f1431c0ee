use async_trait::async_trait;

/// Object storage for user-supplied images (post photos, pet photos, icons).
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores the bytes under `directory/` and returns the object key.
    async fn upload_image(
        &self,
        directory: &str,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String>;
    /// Time-limited GET URL for a stored object.
    async fn presigned_url(&self, key: &str) -> anyhow::Result<String>;
    async fn delete_image(&self, key: &str) -> anyhow::Result<()>;
}

/// An image received from a multipart form, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub async fn store<S: ImageStorage + ?Sized>(
        self,
        storage: &S,
        directory: &str,
    ) -> anyhow::Result<String> {
        storage
            .upload_image(
                directory,
                self.filename.as_deref(),
                self.content_type.as_deref(),
                self.bytes,
            )
            .await
    }
}
