use async_trait::async_trait;
use std::time::Duration;

use crate::{CatalogError, Result};

/// Downloads the raw bytes behind an image URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Whole response body for `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Unauthenticated GET with a per-request timeout and a body size cap.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Build a dedicated client with `timeout` applied to each request.
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Failed to create HTTP client: {}",
                    e
                ))
            })?;
        Ok(Self::with_client(client, max_bytes))
    }

    /// Reuse an existing client.
    pub fn with_client(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    fn too_large(&self, size: u64) -> CatalogError {
        CatalogError::Fetch(format!(
            "image is {} bytes, limit is {}",
            size, self.max_bytes
        ))
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut response =
            self.client.get(url).send().await.map_err(|e| {
                CatalogError::Fetch(format!("Failed to download image: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::Fetch(format!(
                "Failed to download image: HTTP {}",
                response.status()
            )));
        }

        if let Some(len) = response.content_length()
            && len > self.max_bytes as u64
        {
            return Err(self.too_large(len));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            CatalogError::Fetch(format!("Failed to read image data: {}", e))
        })? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large((body.len() + chunk.len()) as u64));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}
