//! Utility functions

use crate::compositor::Frame;
use eframe::egui;
use std::path::PathBuf;

/// Per-user data directory (settings.json, logs/)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Case Customizer")
}

pub fn frame_to_color_image(frame: &Frame) -> egui::ColorImage {
    let size = [frame.image.width() as usize, frame.image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, frame.image.as_raw())
}
