//! Cloudinary object store
//!
//! Uses the signed upload API: parameters are sorted, joined as
//! `key=value&...`, suffixed with the API secret and SHA-1 hashed.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use crate::config::ObjectStoreConfig;
use crate::error::{Error, Result};
use crate::providers::object_store::{ObjectStoreProvider, ResourceType};

/// Cloudinary upload client
pub struct CloudinaryStore {
    client: Client,
    config: ObjectStoreConfig,
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

impl CloudinaryStore {
    /// Create a new Cloudinary store
    pub fn new(config: ObjectStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn upload_url(&self, resource_type: ResourceType) -> String {
        format!(
            "{}/{}/{}/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            resource_type.as_str()
        )
    }

    /// Sign the given parameters. `file`, `api_key`, `resource_type` and
    /// `cloud_name` must not be among them.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut payload = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        payload.push_str(&self.config.api_secret);

        let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, payload.as_bytes());
        hex::encode(digest.as_ref())
    }
}

#[async_trait]
impl ObjectStoreProvider for CloudinaryStore {
    async fn upload(&self, key: &str, data: &[u8], resource_type: ResourceType) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", key), ("timestamp", timestamp.as_str())]);

        let file_name = key.rsplit('/').next().unwrap_or(key).to_string();
        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("public_id", key.to_string())
            .text("signature", signature)
            .part("file", Part::bytes(data.to_vec()).file_name(file_name));

        let response = self
            .client
            .post(self.upload_url(resource_type))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::object_store(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::object_store(format!(
                "Upload rejected ({}): {}",
                status, body
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::object_store(format!("Failed to parse upload response: {}", e)))?;

        uploaded
            .secure_url
            .ok_or_else(|| Error::object_store("Upload response has no secure_url"))
    }

    fn name(&self) -> &str {
        "cloudinary"
    }
}
