//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Catalog source
    pub api_base_url: String,
    pub raw_base_url: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub repo_branch: String,
    pub design_folder: String,
    pub material_folder: String,

    // Network
    pub fetch_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: API_BASE_URL.to_string(),
            raw_base_url: RAW_BASE_URL.to_string(),
            repo_owner: REPO_OWNER.to_string(),
            repo_name: REPO_NAME.to_string(),
            repo_branch: REPO_BRANCH.to_string(),
            design_folder: DESIGN_FOLDER.to_string(),
            material_folder: MATERIAL_FOLDER.to_string(),
            fetch_retries: DEFAULT_FETCH_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
