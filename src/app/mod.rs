//! App module - contains the main application state and logic

mod catalog;
mod preview;
mod views;

use crate::catalog::CatalogClient;
use crate::constants::*;
use crate::loader::ImageLoader;
use crate::manufacturers::ManufacturerCatalog;
use crate::preview::{PreviewDisplay, PreviewPipeline};
use crate::selection::SelectionController;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Catalog
    pub(crate) catalog_client: CatalogClient,
    pub(crate) catalog_status: CatalogStatus,
    pub(crate) catalog_result: Arc<Mutex<Option<Result<CatalogFetch, String>>>>,
    pub(crate) catalog_started: bool,
    // Selection + preview
    pub(crate) selection: SelectionController,
    pub(crate) pipeline: PreviewPipeline,
    pub(crate) preview_texture: Option<egui::TextureHandle>,
    pub(crate) preview: PreviewDisplay,
    // Inline status line
    pub(crate) status: Option<StatusMessage>,
    // Window tracking
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
        client: reqwest::Client,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for selector labels and status line
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let catalog_client = CatalogClient::new(client.clone(), &settings);
        let pipeline = PreviewPipeline::new(ImageLoader::new(client), SURFACE_SIZE, SURFACE_SIZE);

        Self {
            settings,
            data_dir,
            runtime,
            catalog_client,
            catalog_status: CatalogStatus::Idle,
            catalog_result: Arc::new(Mutex::new(None)),
            catalog_started: false,
            selection: SelectionController::new(ManufacturerCatalog::builtin()),
            pipeline,
            preview_texture: None,
            preview: PreviewDisplay::default(),
            status: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    /// Only window geometry is written back; selections are never persisted.
    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }
}
