//! Upload channel for source archives
//!
//! The channel owns transport concerns end to end: callers hand it a local
//! archive path and get back an opaque location reference for the scan
//! request. The HTTP implementation asks the uploads endpoint for a
//! presigned URL and PUTs the archive bytes to it.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{Result, UploadError};

/// Destination for packaged source archives
#[async_trait]
pub trait UploadChannel: Send + Sync {
    /// Upload a local archive, returning its opaque location reference
    async fn upload(&self, archive: &Path) -> Result<String>;
}

/// Presigned-URL upload flow against the platform's uploads endpoint
pub struct HttpUploadChannel {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl HttpUploadChannel {
    /// Create a channel against the given host, or the hosted default
    pub fn new(api_key: Option<String>, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| UploadError::Transfer(e.to_string()))?;

        Ok(Self {
            http,
            base_url: host.unwrap_or_else(|| crate::client::http::API_BASE_URL.to_string()),
            api_key,
        })
    }

    async fn presign(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct UploadLocation {
            url: String,
        }

        let request = self.http.post(format!("{}/uploads", self.base_url));
        let request = match &self.api_key {
            Some(key) => request.header("X-ApiKey", key),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Presign(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Presign(format!("status code {status}")).into());
        }

        let location: UploadLocation = response
            .json()
            .await
            .map_err(|e| UploadError::Presign(e.to_string()))?;
        Ok(location.url)
    }
}

#[async_trait]
impl UploadChannel for HttpUploadChannel {
    async fn upload(&self, archive: &Path) -> Result<String> {
        let url = self.presign().await?;

        let data = tokio::fs::read(archive)
            .await
            .map_err(|e| UploadError::Transfer(e.to_string()))?;

        let response = self
            .http
            .put(&url)
            .body(data)
            .send()
            .await
            .map_err(|e| UploadError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Transfer(format!("status code {status}")).into());
        }

        Ok(url)
    }
}
