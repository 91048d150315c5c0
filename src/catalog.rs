//! Remote catalog fetcher
//!
//! Lists a repository folder through the contents API, keeps image files and
//! maps each one to a raw-content URL on the configured branch.

use crate::constants::{IMAGE_EXTENSIONS, USER_AGENT};
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::types::{CatalogEntry, ListingEntry};
use std::time::Duration;
use tracing::{debug, warn};

/// Shared HTTP client for listings and image downloads.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::Client)
}

/// True when the path ends in one of the accepted image extensions (any case).
pub fn is_image_path(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)),
        None => false,
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    api_base: String,
    raw_base: String,
    owner: String,
    repo: String,
    branch: String,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            api_base: settings.api_base_url.trim_end_matches('/').to_string(),
            raw_base: settings.raw_base_url.trim_end_matches('/').to_string(),
            owner: settings.repo_owner.clone(),
            repo: settings.repo_name.clone(),
            branch: settings.repo_branch.clone(),
        }
    }

    pub fn listing_url(&self, folder: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, folder
        )
    }

    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, self.owner, self.repo, self.branch, path
        )
    }

    /// Keep image entries in listing order and attach their raw URLs.
    pub fn entries_from_listing(&self, listing: Vec<ListingEntry>) -> Vec<CatalogEntry> {
        listing
            .into_iter()
            .filter(|entry| is_image_path(&entry.path))
            .map(|entry| CatalogEntry {
                url: self.raw_url(&entry.path),
                name: entry.name,
            })
            .collect()
    }

    pub async fn fetch_files(&self, folder: &str) -> Result<Vec<CatalogEntry>> {
        let url = self.listing_url(folder);
        debug!(url = %url, "Fetching directory listing");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| Error::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url, status });
        }

        let listing = response
            .json::<Vec<ListingEntry>>()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    Error::MalformedListing {
                        url: url.clone(),
                        reason: e.to_string(),
                    }
                } else {
                    Error::Network {
                        url: url.clone(),
                        source: e,
                    }
                }
            })?;

        let total = listing.len();
        let entries = self.entries_from_listing(listing);
        debug!(folder, total, images = entries.len(), "Directory listing parsed");
        Ok(entries)
    }

    /// `fetch_files` with up to `retries` extra attempts and linear backoff.
    pub async fn fetch_files_with_retry(
        &self,
        folder: &str,
        retries: u32,
        backoff: Duration,
    ) -> Result<Vec<CatalogEntry>> {
        let mut attempt = 0;
        loop {
            match self.fetch_files(folder).await {
                Ok(entries) => return Ok(entries),
                Err(e) if e.is_retryable() && attempt < retries => {
                    attempt += 1;
                    warn!(folder, attempt, error = %e, "Listing fetch failed, retrying");
                    tokio::time::sleep(backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
