//! Profile photo hosting. Uploads return a public URL that is stored on the
//! resume; a failed upload never fails the resume update that carried it.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::ImageHostConfig;

/// Crop to a 400×400 square, focus on the face, zoom.
const BASE_TRANSFORMATION: &str = "w-400,h-400,fo-face,z-2";
const BACKGROUND_REMOVAL: &str = "bg-remove";

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Image hosting is not configured")]
    Disabled,
}

/// A photo received with a resume update.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub remove_background: bool,
}

impl ImageUpload {
    /// The host-side transformation applied to the photo.
    pub fn transformation(&self) -> String {
        if self.remove_background {
            format!("{BASE_TRANSFORMATION},{BACKGROUND_REMOVAL}")
        } else {
            BASE_TRANSFORMATION.to_string()
        }
    }

    /// Stored file name: timestamped, with path separators and spaces replaced.
    pub fn storage_name(&self) -> String {
        let safe: String = self
            .file_name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ' ' => '-',
                c => c,
            })
            .collect();
        format!("resume-{}-{}", Utc::now().timestamp_millis(), safe)
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads the photo and returns its public URL.
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError>;
}

// ────────────────────────────────────────────────────────────────────────────
// ImageKit
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ImageKitUploadResponse {
    url: String,
}

/// Uploads through ImageKit's upload API, which applies the transformation
/// as a pre-processing step.
pub struct ImageKitHost {
    http: Client,
    private_key: String,
    upload_url: String,
    folder: String,
}

impl ImageKitHost {
    pub fn new(private_key: String, upload_url: String, folder: String) -> Self {
        Self {
            http: Client::new(),
            private_key,
            upload_url,
            folder,
        }
    }
}

#[async_trait]
impl ImageHost for ImageKitHost {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError> {
        let file_name = image.storage_name();
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("fileName", file_name)
            .text("folder", self.folder.clone())
            .text(
                "transformation",
                json!({ "pre": image.transformation() }).to_string(),
            );

        let response = self
            .http
            .post(&self.upload_url)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageHostError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ImageKitUploadResponse = response.json().await?;
        info!("Uploaded profile image to ImageKit: {}", body.url);
        Ok(body.url)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

/// Stores the original upload in a bucket. No transformation is applied.
pub struct S3ImageHost {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3ImageHost {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_url: String) -> Self {
        Self {
            client,
            bucket,
            public_url,
        }
    }

    fn object_key(&self, image: &ImageUpload) -> String {
        format!("profile-images/{}/{}", Uuid::new_v4(), image.storage_name())
    }
}

#[async_trait]
impl ImageHost for S3ImageHost {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError> {
        let key = self.object_key(image);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(image.bytes.clone()))
            .content_type(&image.content_type)
            .send()
            .await
            .map_err(|e| ImageHostError::Storage(e.to_string()))?;

        info!("Uploaded profile image to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_url.trim_end_matches('/'), key))
    }
}

/// Used when no image host is configured. Every upload fails.
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(&self, _image: &ImageUpload) -> Result<String, ImageHostError> {
        Err(ImageHostError::Disabled)
    }
}

/// Constructs the configured image host.
pub async fn build_image_host(config: &ImageHostConfig) -> Arc<dyn ImageHost> {
    match config {
        ImageHostConfig::ImageKit {
            private_key,
            upload_url,
            folder,
        } => {
            info!("Image host: ImageKit ({upload_url})");
            Arc::new(ImageKitHost::new(
                private_key.clone(),
                upload_url.clone(),
                folder.clone(),
            ))
        }
        ImageHostConfig::S3 {
            bucket,
            endpoint,
            access_key_id,
            secret_access_key,
            public_url,
        } => {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "folio-static",
            );
            let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .credentials_provider(credentials)
                .endpoint_url(endpoint)
                .load()
                .await;
            let s3 = aws_sdk_s3::config::Builder::from(&s3_config)
                .force_path_style(true)
                .build();

            info!("Image host: S3 bucket '{bucket}' at {endpoint}");
            Arc::new(S3ImageHost::new(
                aws_sdk_s3::Client::from_conf(s3),
                bucket.clone(),
                public_url.clone(),
            ))
        }
        ImageHostConfig::Disabled => {
            info!("Image host: disabled, photo uploads will be ignored");
            Arc::new(DisabledImageHost)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(remove_background: bool) -> ImageUpload {
        ImageUpload {
            file_name: "my photo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"png"),
            remove_background,
        }
    }

    #[test]
    fn test_transformation_pipeline() {
        assert_eq!(upload(false).transformation(), "w-400,h-400,fo-face,z-2");
        assert_eq!(
            upload(true).transformation(),
            "w-400,h-400,fo-face,z-2,bg-remove"
        );
    }

    #[test]
    fn test_storage_name_is_sanitized() {
        let name = upload(false).storage_name();
        assert!(name.starts_with("resume-"));
        assert!(name.ends_with("-my-photo.png"));
        assert!(!name.contains(' '));
    }

    #[tokio::test]
    async fn test_disabled_host_always_fails() {
        let err = DisabledImageHost.upload(&upload(false)).await.unwrap_err();
        assert!(matches!(err, ImageHostError::Disabled));
    }
}
