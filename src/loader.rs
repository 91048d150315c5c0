//! Image loader: URL (or local path) to decoded RGBA bitmap

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Anything without a scheme, or with `file://`, is read from disk.
fn local_path(url: &str) -> Option<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        Some(PathBuf::from(path))
    } else if url.contains("://") {
        None
    } else {
        Some(PathBuf::from(url))
    }
}

/// Decode raw bytes into RGBA8. Zero-sized images are rejected.
pub fn decode(url: &str, bytes: &[u8]) -> Result<image::RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::Decode {
            url: url.to_string(),
            reason: "image has no pixels".into(),
        });
    }
    Ok(rgba)
}

#[derive(Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch without credentials and decode off the async threads.
    pub async fn load(&self, url: &str) -> Result<image::RgbaImage> {
        let bytes = match local_path(url) {
            Some(path) => tokio::fs::read(&path).await.map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?,
            None => self.download(url).await?,
        };
        debug!(url, bytes = bytes.len(), "Image bytes received");

        let owned_url = url.to_string();
        let img = tokio::task::spawn_blocking(move || decode(&owned_url, &bytes)).await??;
        debug!(url, width = img.width(), height = img.height(), "Image decoded");
        Ok(img)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let network = |source| Error::Network {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await.map_err(network)?;
        Ok(bytes.to_vec())
    }
}
