//! Error type shared by the catalog, loader and compositing paths

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure while talking to the listing endpoint or image host.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The directory listing was not a JSON array of entries.
    #[error("malformed directory listing from {url}: {reason}")]
    MalformedListing { url: String, reason: String },

    /// Bytes were received but are not a decodable image.
    #[error("failed to decode image {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Local image file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A blocking decode/compose task panicked or was aborted.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Transport and status failures are worth another attempt; bad payloads are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network { .. } | Error::HttpStatus { .. })
    }
}
