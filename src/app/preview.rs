//! Preview subscriber: turns selection events into renders and renders into a texture

use super::App;
use crate::selection::SelectionEvent;
use crate::utils::frame_to_color_image;
use eframe::egui;
use tracing::debug;

impl App {
    /// Drain selection events; several changes in one frame collapse into one render.
    pub fn handle_selection_events(&mut self, ctx: &egui::Context) {
        let events = self.selection.drain_events();
        if events.contains(&SelectionEvent::PreviewRequested) {
            self.request_preview(ctx);
        }
    }

    fn request_preview(&mut self, ctx: &egui::Context) {
        let Some(target) = self.selection.preview_target() else {
            debug!("No design selected, preview left as is");
            return;
        };
        let repaint = ctx.clone();
        self.pipeline
            .request(self.runtime.handle(), target, move || repaint.request_repaint());
        self.preview.mark_pending();
    }

    /// On failure the previous frame stays on screen.
    pub fn poll_preview(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.pipeline.take_outcome() else {
            return;
        };
        let Some(frame) = self.preview.apply(outcome) else {
            return;
        };

        let image = frame_to_color_image(frame);
        match &mut self.preview_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.preview_texture =
                    Some(ctx.load_texture("preview", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}
