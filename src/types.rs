//! Common types and data structures

/// One selectable image from the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

/// Directory entry as returned by the repository contents endpoint
#[derive(Debug, serde::Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub path: String,
}

/// Current material selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialChoice {
    /// Sentinel: skip the blend step entirely.
    #[default]
    NoMaterial,
    /// Index into the material catalog.
    Entry(usize),
}

/// Load state of the design/material catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Result of one startup catalog fetch, handed from the runtime to the UI
pub struct CatalogFetch {
    pub designs: Vec<CatalogEntry>,
    pub materials: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Inline, non-fatal message shown under the selectors
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}
