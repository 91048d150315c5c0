//! Reusable UI components
//!
//! Selector combo boxes, the inline status line and the checkerboard
//! backdrop drawn behind the preview surface.

use crate::theme;
use crate::types::{StatusLevel, StatusMessage};
use eframe::egui;

/// What the user picked in a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The leading placeholder/sentinel entry (e.g. "Select Model", "No Material").
    Placeholder,
    Item(usize),
}

/// Labelled combo box. Returns a pick only when the value actually changed,
/// mirroring a `change` event.
pub fn selector(
    ui: &mut egui::Ui,
    icon: &str,
    label: &str,
    placeholder: Option<&str>,
    items: &[&str],
    current: Option<usize>,
) -> Option<Pick> {
    ui.label(
        egui::RichText::new(format!("{}  {}", icon, label.to_uppercase()))
            .size(theme::FONT_SECTION)
            .color(theme::TEXT_MUTED),
    );

    let selected_text = match current.and_then(|i| items.get(i)) {
        Some(item) => item.to_string(),
        None => placeholder.unwrap_or("").to_string(),
    };

    let mut picked = None;
    ui.add_enabled_ui(placeholder.is_some() || !items.is_empty(), |ui| {
        egui::ComboBox::from_id_salt(label)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if let Some(placeholder) = placeholder {
                    let response = ui.selectable_label(current.is_none(), placeholder);
                    if response.clicked() && current.is_some() {
                        picked = Some(Pick::Placeholder);
                    }
                }
                for (i, item) in items.iter().enumerate() {
                    let selected = current == Some(i);
                    if ui.selectable_label(selected, *item).clicked() && !selected {
                        picked = Some(Pick::Item(i));
                    }
                }
            });
    });
    ui.add_space(theme::SPACING_MD);

    picked
}

pub fn status_line(ui: &mut egui::Ui, status: &StatusMessage) {
    let (icon, color) = match status.level {
        StatusLevel::Info => (egui_phosphor::regular::INFO, theme::TEXT_MUTED),
        StatusLevel::Error => (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR),
    };
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(icon).color(color));
        ui.label(
            egui::RichText::new(&status.text)
                .size(theme::FONT_SMALL)
                .color(color),
        );
    });
}

/// Checkerboard so the transparent letterbox reads as empty, not black.
pub fn paint_checkerboard(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, theme::CHECKER_DARK);
    let cell = theme::CHECKER_CELL;
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 {
                continue;
            }
            let min = rect.min + egui::vec2(col as f32 * cell, row as f32 * cell);
            let cell_rect = egui::Rect::from_min_size(min, egui::vec2(cell, cell)).intersect(rect);
            painter.rect_filled(cell_rect, 0.0, theme::CHECKER_LIGHT);
        }
    }
}
