//! Selection controller: manufacturer -> model -> design/material cascade
//!
//! Every mutation records what happened as a [`SelectionEvent`]. The app drains
//! the queue once per frame and hands preview requests to the single renderer.

use crate::manufacturers::ManufacturerCatalog;
use crate::types::{CatalogEntry, MaterialChoice};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Design or material changed; the preview must be recomputed.
    PreviewRequested,
}

/// Current value of each selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub manufacturer: Option<String>,
    /// Index into the model options; names can repeat within a manufacturer.
    pub model: Option<usize>,
    pub design: Option<usize>,
    pub material: MaterialChoice,
}

/// URLs the compositor needs for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
    pub design_url: String,
    pub material_url: Option<String>,
}

pub struct SelectionController {
    manufacturers: ManufacturerCatalog,
    model_options: Vec<String>,
    designs: Vec<CatalogEntry>,
    materials: Vec<CatalogEntry>,
    selection: Selection,
    events: Vec<SelectionEvent>,
}

impl SelectionController {
    pub fn new(manufacturers: ManufacturerCatalog) -> Self {
        Self {
            manufacturers,
            model_options: Vec::new(),
            designs: Vec::new(),
            materials: Vec::new(),
            selection: Selection::default(),
            events: Vec::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn manufacturers(&self) -> &ManufacturerCatalog {
        &self.manufacturers
    }

    pub fn model_options(&self) -> &[String] {
        &self.model_options
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model_options
            .get(self.selection.model?)
            .map(String::as_str)
    }

    pub fn designs(&self) -> &[CatalogEntry] {
        &self.designs
    }

    pub fn materials(&self) -> &[CatalogEntry] {
        &self.materials
    }

    /// Install the fetched catalog: first design selected, material reset.
    pub fn set_catalog(&mut self, designs: Vec<CatalogEntry>, materials: Vec<CatalogEntry>) {
        debug!(
            designs = designs.len(),
            materials = materials.len(),
            "Catalog installed"
        );
        self.designs = designs;
        self.materials = materials;
        self.selection.design = if self.designs.is_empty() { None } else { Some(0) };
        self.selection.material = MaterialChoice::NoMaterial;
        if self.selection.design.is_some() {
            self.events.push(SelectionEvent::PreviewRequested);
        }
    }

    /// Clears the model; repopulates model options when the manufacturer is known.
    /// Only the option list changes, so nothing is queued.
    pub fn set_manufacturer(&mut self, manufacturer: Option<String>) {
        self.selection.model = None;
        self.model_options = manufacturer
            .as_deref()
            .and_then(|name| self.manufacturers.models(name))
            .map(|models| models.to_vec())
            .unwrap_or_default();
        debug!(
            manufacturer = ?manufacturer,
            models = self.model_options.len(),
            "Manufacturer changed"
        );
        self.selection.manufacturer = manufacturer;
    }

    /// Resets design to the first entry and material to the sentinel, then re-renders.
    /// Out-of-range indices are ignored.
    pub fn set_model(&mut self, model: Option<usize>) {
        if model.is_some_and(|i| i >= self.model_options.len()) {
            return;
        }
        debug!(
            model = ?model.map(|i| self.model_options[i].as_str()),
            index = ?model,
            "Model changed"
        );
        self.selection.model = model;
        if !self.designs.is_empty() {
            self.selection.design = Some(0);
        }
        self.selection.material = MaterialChoice::NoMaterial;
        self.events.push(SelectionEvent::PreviewRequested);
    }

    /// Out-of-range indices are ignored.
    pub fn set_design(&mut self, index: usize) {
        if index >= self.designs.len() {
            return;
        }
        self.selection.design = Some(index);
        self.events.push(SelectionEvent::PreviewRequested);
    }

    pub fn set_material(&mut self, choice: MaterialChoice) {
        if let MaterialChoice::Entry(index) = choice {
            if index >= self.materials.len() {
                return;
            }
        }
        self.selection.material = choice;
        self.events.push(SelectionEvent::PreviewRequested);
    }

    /// `None` when no design is selected (nothing to render).
    pub fn preview_target(&self) -> Option<PreviewTarget> {
        let design = self.designs.get(self.selection.design?)?;
        let material_url = match self.selection.material {
            MaterialChoice::NoMaterial => None,
            MaterialChoice::Entry(i) => self.materials.get(i).map(|m| m.url.clone()),
        };
        Some(PreviewTarget {
            design_url: design.url.clone(),
            material_url,
        })
    }

    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }
}
