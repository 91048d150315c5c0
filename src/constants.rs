//! Application constants and configuration defaults

pub const APP_NAME: &str = "Case Customizer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT: &str = concat!("case-customizer/", env!("CARGO_PKG_VERSION"));

pub const API_BASE_URL: &str = "https://api.github.com";
pub const RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const REPO_OWNER: &str = "Woschj";
pub const REPO_NAME: &str = "CatchyCases";
pub const REPO_BRANCH: &str = "main";
pub const DESIGN_FOLDER: &str = "design";
pub const MATERIAL_FOLDER: &str = "materials";

/// Side length of the square preview surface, in pixels.
pub const SURFACE_SIZE: u32 = 544;

/// File extensions (case-insensitive) accepted from directory listings.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

pub const DEFAULT_FETCH_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

pub const MANUFACTURER_PLACEHOLDER: &str = "Select Manufacturer";
pub const MODEL_PLACEHOLDER: &str = "Select Model";
pub const NO_MATERIAL_LABEL: &str = "No Material";

/// Manufacturer -> models, in display order. Duplicates are kept as published.
pub const MANUFACTURERS: &[(&str, &[&str])] = &[
    (
        "Apple",
        &["iPhone SE", "iPhone 12", "iPhone 12 Pro", "iPhone 13", "iPhone 13 Pro"],
    ),
    (
        "Samsung",
        &["Galaxy S21", "Galaxy S21+", "Galaxy Note 20", "Galaxy A52", "Galaxy A52"],
    ),
    (
        "Google",
        &["Pixel 4", "Pixel 4a", "Pixel 5", "Pixel 5a", "Pixel 6"],
    ),
];
