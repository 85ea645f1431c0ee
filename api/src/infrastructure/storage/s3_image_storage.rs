use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, error::SdkError};
use uuid::Uuid;

use crate::application::ports::storage_port::ImageStorage;
use crate::bootstrap::config::Config;

pub struct S3ImageStorage {
    client: Client,
    bucket: String,
    presign_expires: Duration,
}

impl S3ImageStorage {
    pub async fn new(shared_config: &SdkConfig, cfg: &Config) -> anyhow::Result<Self> {
        let mut builder = aws_sdk_s3::config::Builder::from(shared_config);

        if let (Some(access), Some(secret)) = (&cfg.s3_access_key, &cfg.s3_secret_key) {
            let creds = Credentials::new(
                access.clone(),
                secret.clone(),
                None,
                None,
                "animalia-s3-static",
            );
            builder = builder.credentials_provider(creds);
        }

        if let Some(endpoint) = &cfg.s3_endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        if cfg.s3_use_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());
        ensure_bucket(&client, &cfg.s3_bucket).await?;

        Ok(Self {
            client,
            bucket: cfg.s3_bucket.clone(),
            presign_expires: Duration::from_secs(cfg.presign_expires_secs),
        })
    }
}

#[async_trait]
impl ImageStorage for S3ImageStorage {
    async fn upload_image(
        &self,
        directory: &str,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        let name = sanitize_filename(original_filename.unwrap_or("image"));
        let key = object_key(directory, &name);
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty() && *ct != "application/octet-stream")
            .map(str::to_string)
            .unwrap_or_else(|| mime_guess::from_path(&name).first_or_octet_stream().to_string());
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .with_context(|| format!("failed to upload {key}"))?;
        tracing::debug!(key = %key, "image_uploaded");
        Ok(key)
    }

    async fn presigned_url(&self, key: &str) -> anyhow::Result<String> {
        let presign = PresigningConfig::expires_in(self.presign_expires)
            .context("invalid presign lifetime")?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign)
            .await
            .with_context(|| format!("failed to presign {key}"))?;
        Ok(request.uri().to_string())
    }

    async fn delete_image(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete {key}"))?;
        Ok(())
    }
}

fn object_key(directory: &str, filename: &str) -> String {
    let dir = directory.trim_matches('/');
    format!("{dir}/{}-{filename}", Uuid::new_v4())
}

/// Base name only, restricted to characters safe in object keys and URLs.
fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.chars().take(100).collect()
    }
}

async fn ensure_bucket(client: &Client, bucket: &str) -> anyhow::Result<()> {
    match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => return Ok(()),
        Err(SdkError::ServiceError(service_err)) => {
            if !matches!(service_err.err(), HeadBucketError::NotFound(_)) {
                return Err(anyhow!(service_err.err().to_string()));
            }
        }
        Err(err) => return Err(anyhow!(err.to_string())),
    }

    tracing::info!(bucket = %bucket, "creating_bucket");
    match client.create_bucket().bucket(bucket).send().await {
        Ok(_) => Ok(()),
        Err(SdkError::ServiceError(service_err)) => match service_err.err() {
            CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
            CreateBucketError::BucketAlreadyExists(_) => Ok(()),
            other => Err(anyhow!(other.to_string())),
        },
        Err(err) => Err(anyhow!(err.to_string())),
    }
}
