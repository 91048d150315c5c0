//! Startup catalog fetch (designs, then materials)

use super::App;
use crate::types::*;
use eframe::egui;
use tracing::{error, info};

impl App {
    /// Runs once on the first frame, and again from the Retry button.
    pub fn start_catalog_fetch(&mut self, ctx: &egui::Context) {
        if self.catalog_status == CatalogStatus::Loading {
            return;
        }
        self.catalog_status = CatalogStatus::Loading;
        self.status = Some(StatusMessage::info("Loading designs and materials…"));

        let client = self.catalog_client.clone();
        let slot = self.catalog_result.clone();
        let ctx = ctx.clone();
        let design_folder = self.settings.design_folder.clone();
        let material_folder = self.settings.material_folder.clone();
        let retries = self.settings.fetch_retries;
        let backoff = self.settings.retry_backoff();

        info!(
            designs = %design_folder,
            materials = %material_folder,
            "Starting catalog fetch"
        );

        self.runtime.spawn(async move {
            let result = async {
                let designs = client
                    .fetch_files_with_retry(&design_folder, retries, backoff)
                    .await?;
                let materials = client
                    .fetch_files_with_retry(&material_folder, retries, backoff)
                    .await?;
                Ok::<_, crate::error::Error>(CatalogFetch { designs, materials })
            }
            .await
            .map_err(|e| {
                error!(error = %e, "Catalog fetch failed");
                e.to_string()
            });

            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
            ctx.request_repaint();
        });
    }

    pub fn poll_catalog(&mut self) {
        let Some(result) = self
            .catalog_result
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        else {
            return;
        };

        match result {
            Ok(CatalogFetch { designs, materials }) => {
                info!(
                    designs = designs.len(),
                    materials = materials.len(),
                    "Catalog loaded"
                );
                self.status = if designs.is_empty() {
                    Some(StatusMessage::info("No designs available"))
                } else {
                    None
                };
                self.catalog_status = CatalogStatus::Ready;
                self.selection.set_catalog(designs, materials);
            }
            Err(message) => {
                self.status = Some(StatusMessage::error(format!(
                    "Could not load catalog: {}",
                    message
                )));
                self.catalog_status = CatalogStatus::Failed(message);
            }
        }
    }
}
