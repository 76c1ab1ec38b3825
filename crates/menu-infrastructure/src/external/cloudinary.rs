// ============================================================================
// Menu Infrastructure - Cloudinary Asset Host
// File: crates/menu-infrastructure/src/external/cloudinary.rs
// ============================================================================
//! Unsigned uploads through an upload preset; the stored URL is `secure_url`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use menu_core::error::DomainError;
use menu_core::ports::{AssetHost, AssetUpload};
use menu_shared::config::AssetSettings;

#[derive(Clone)]
pub struct CloudinaryAssetHost {
    client: Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryAssetHost {
    pub fn new(settings: &AssetSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .context("building asset host HTTP client")?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/upload",
                settings.api_base_url.trim_end_matches('/'),
                settings.cloud_name
            ),
            upload_preset: settings.upload_preset.clone(),
        })
    }
}

#[async_trait]
impl AssetHost for CloudinaryAssetHost {
    async fn upload(&self, asset: AssetUpload) -> Result<String, DomainError> {
        let size = asset.bytes.len();
        let mut part = Part::bytes(asset.bytes).file_name(asset.file_name.clone());
        if let Some(content_type) = asset.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| DomainError::UploadError(format!("Invalid content type: {}", e)))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        debug!("Uploading {} ({} bytes) to asset host", asset.file_name, size);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Asset host network error: {}", e);
                DomainError::UploadError(format!("Upload failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Asset host rejected upload ({}): {}", status, text);
            return Err(DomainError::UploadError(format!("Upload failed ({})", status)));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| DomainError::UploadError(format!("Unreadable upload response: {}", e)))?;

        info!("Uploaded {} to {}", asset.file_name, body.secure_url);
        Ok(body.secure_url)
    }
}
