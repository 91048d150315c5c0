//! View rendering (selector sidebar, preview surface)

use super::App;
use crate::constants::*;
use crate::theme;
use crate::types::*;
use crate::ui::components::{paint_checkerboard, selector, status_line, Pick};
use eframe::egui;

impl App {
    pub fn render_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(
            egui::RichText::new(format!("{}  {}", egui_phosphor::regular::DEVICE_MOBILE, APP_NAME))
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(theme::SPACING_XL);

        // Manufacturer
        let manufacturers: Vec<String> = self
            .selection
            .manufacturers()
            .manufacturers()
            .map(str::to_string)
            .collect();
        let names: Vec<&str> = manufacturers.iter().map(String::as_str).collect();
        let current = self
            .selection
            .selection()
            .manufacturer
            .as_ref()
            .and_then(|m| manufacturers.iter().position(|n| n == m));
        match selector(
            ui,
            egui_phosphor::regular::BUILDINGS,
            "Manufacturer",
            Some(MANUFACTURER_PLACEHOLDER),
            &names,
            current,
        ) {
            Some(Pick::Item(i)) => self.selection.set_manufacturer(Some(manufacturers[i].clone())),
            Some(Pick::Placeholder) => self.selection.set_manufacturer(None),
            None => {}
        }

        // Model
        let models = self.selection.model_options().to_vec();
        let names: Vec<&str> = models.iter().map(String::as_str).collect();
        let current = self.selection.selection().model;
        match selector(
            ui,
            egui_phosphor::regular::DEVICE_MOBILE_CAMERA,
            "Model",
            Some(MODEL_PLACEHOLDER),
            &names,
            current,
        ) {
            Some(Pick::Item(i)) => self.selection.set_model(Some(i)),
            Some(Pick::Placeholder) => self.selection.set_model(None),
            None => {}
        }

        // Design
        let designs: Vec<&str> = self.selection.designs().iter().map(|d| d.name.as_str()).collect();
        let current = self.selection.selection().design;
        let picked = selector(
            ui,
            egui_phosphor::regular::PAINT_BRUSH,
            "Design",
            None,
            &designs,
            current,
        );
        if let Some(Pick::Item(i)) = picked {
            self.selection.set_design(i);
        }

        // Material
        let materials: Vec<&str> = self
            .selection
            .materials()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        let current = match self.selection.selection().material {
            MaterialChoice::NoMaterial => None,
            MaterialChoice::Entry(i) => Some(i),
        };
        let picked = selector(
            ui,
            egui_phosphor::regular::STACK,
            "Material",
            Some(NO_MATERIAL_LABEL),
            &materials,
            current,
        );
        match picked {
            Some(Pick::Item(i)) => self.selection.set_material(MaterialChoice::Entry(i)),
            Some(Pick::Placeholder) => self.selection.set_material(MaterialChoice::NoMaterial),
            None => {}
        }

        ui.add_space(theme::SPACING_LG);

        if self.catalog_status == CatalogStatus::Loading || self.preview.is_pending() {
            ui.horizontal(|ui| {
                ui.spinner();
                let text = if self.catalog_status == CatalogStatus::Loading {
                    "Fetching catalog"
                } else {
                    "Rendering preview"
                };
                ui.label(
                    egui::RichText::new(text)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });
        }

        if let Some(status) = &self.status {
            status_line(ui, status);
        }
        if let Some(status) = self.preview.status() {
            status_line(ui, status);
        }

        if matches!(self.catalog_status, CatalogStatus::Failed(_)) {
            ui.add_space(theme::SPACING_SM);
            let retry = format!("{}  Retry", egui_phosphor::regular::ARROW_CLOCKWISE);
            if ui.add(theme::button_accent(retry)).clicked() {
                self.start_catalog_fetch(ctx);
            }
        }
    }

    /// Square surface scaled down to fit the panel; letterbox stays transparent.
    pub fn render_preview(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let side = available.x.min(available.y).min(SURFACE_SIZE as f32).max(64.0);

        ui.centered_and_justified(|ui| {
            theme::surface_frame().show(ui, |ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
                paint_checkerboard(ui.painter(), rect);

                match &self.preview_texture {
                    Some(texture) => {
                        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
                    }
                    None => {
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::IMAGE,
                            egui::FontId::proportional(48.0),
                            theme::TEXT_DIM,
                        );
                    }
                }

                if let Some(placement) = self.preview.placement() {
                    let scale = side / SURFACE_SIZE as f32;
                    let min = rect.min
                        + egui::vec2(placement.offset_x * scale, placement.offset_y * scale);
                    let outline = egui::Rect::from_min_size(
                        min,
                        egui::vec2(placement.draw_width * scale, placement.draw_height * scale),
                    );
                    ui.painter().rect_stroke(
                        outline,
                        0.0,
                        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT),
                        egui::StrokeKind::Outside,
                    );
                }
            });
        });
    }
}
